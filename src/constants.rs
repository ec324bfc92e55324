#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Column names of the tabular store, in write order.
pub const CSV_HEADER: [&str; 6] = ["Name", "Roll", "Total", "Percentage", "Grade", "Status"];

/// Default path of the tabular store.
pub const DEFAULT_CSV_PATH: &str = "students_data.csv";

/// Default path of the document store.
pub const DEFAULT_DOCUMENT_PATH: &str = "students.jsonl";

/// Heading of a printed result report.
pub const REPORT_TITLE: &str = "STUDENT RESULT REPORT";

/// Rule printed under the report heading.
pub const REPORT_RULE: &str = "-----------------------------";

/// Width in characters of a full (100 marks) bar in the marks chart.
pub const CHART_WIDTH: usize = 40;

/// Environment variable selecting the default grading policy.
pub const ENV_POLICY: &str = "MARKS_POLICY";

/// Environment variable overriding the tabular store path.
pub const ENV_CSV_PATH: &str = "MARKS_CSV_PATH";

/// Environment variable overriding the document store path.
pub const ENV_DOCUMENT_PATH: &str = "MARKS_DOCUMENT_PATH";

/// Environment variable holding the admin username.
pub const ENV_ADMIN_USER: &str = "MARKS_ADMIN_USER";

/// Environment variable holding the admin password.
pub const ENV_ADMIN_PASSWORD: &str = "MARKS_ADMIN_PASSWORD";
