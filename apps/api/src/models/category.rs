/// One of the three fixed policy domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyCategory {
    EconomicEquity,
    PublicHealth,
    DisasterPreparedness,
}

impl PolicyCategory {
    pub const ALL: [PolicyCategory; 3] = [
        PolicyCategory::EconomicEquity,
        PolicyCategory::PublicHealth,
        PolicyCategory::DisasterPreparedness,
    ];

    /// Human-readable name, as embedded in prompts.
    pub fn label(self) -> &'static str {
        match self {
            PolicyCategory::EconomicEquity => "Economic Equity",
            PolicyCategory::PublicHealth => "Public Health",
            PolicyCategory::DisasterPreparedness => "Disaster Preparedness",
        }
    }

    /// URL / wire identifier, e.g. `public-health`.
    pub fn slug(self) -> &'static str {
        match self {
            PolicyCategory::EconomicEquity => "economic-equity",
            PolicyCategory::PublicHealth => "public-health",
            PolicyCategory::DisasterPreparedness => "disaster-preparedness",
        }
    }

    /// Exact, case-sensitive slug match.
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.slug() == slug)
    }
}

impl std::fmt::Display for PolicyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
