pub mod category;
pub mod js_value;
