//! Violation codes emitted by the schema and quiz validators.

pub const MISSING_ID: &str = "MISSING_ID";
pub const INVALID_ID: &str = "INVALID_ID";
pub const DUPLICATE_ID: &str = "DUPLICATE_ID";
pub const MISSING_FIELD: &str = "MISSING_FIELD";
pub const INVALID_CATEGORY: &str = "INVALID_CATEGORY";
pub const INVALID_DIFFICULTY: &str = "INVALID_DIFFICULTY";
pub const MISSING_EXAMPLES: &str = "MISSING_EXAMPLES";
pub const EMPTY_EXAMPLE_CODE: &str = "EMPTY_EXAMPLE_CODE";
pub const NO_EXAMPLE_CODE: &str = "NO_EXAMPLE_CODE";
pub const EMPTY_REQUIRED_COLLECTION: &str = "EMPTY_REQUIRED_COLLECTION";
pub const BLANK_STATEMENT: &str = "BLANK_STATEMENT";
pub const DUPLICATE_STATEMENT: &str = "DUPLICATE_STATEMENT";
pub const CONTRADICTORY_STATEMENT: &str = "CONTRADICTORY_STATEMENT";
pub const INVALID_RESOURCE_TYPE: &str = "INVALID_RESOURCE_TYPE";
pub const MISSING_RESOURCE_URL: &str = "MISSING_RESOURCE_URL";
pub const EMPTY_OPTIONAL_COLLECTION: &str = "EMPTY_OPTIONAL_COLLECTION";

// Quiz records
pub const UNKNOWN_PROTOCOL: &str = "UNKNOWN_PROTOCOL";
pub const TOO_FEW_OPTIONS: &str = "TOO_FEW_OPTIONS";
pub const ANSWER_OUT_OF_RANGE: &str = "ANSWER_OUT_OF_RANGE";
pub const DUPLICATE_OPTION: &str = "DUPLICATE_OPTION";
pub const BLANK_TEXT: &str = "BLANK_TEXT";
