//! Model names understood by the record store.

pub const FARM: &str = "farm.farm";
pub const CROP: &str = "farm.crop";
pub const PROJECT: &str = "farm.cultivation.project";
pub const COST_ENTRY: &str = "farm.cost.analysis";
pub const DAILY_REPORT: &str = "farm.daily.report";
pub const REPORT_LINE: &str = "farm.daily.report.line";
pub const PRODUCT: &str = "product.product";
