pub mod dispatcher;
pub mod report;

pub use dispatcher::{BATCH_SIZE, DispatchSummary, dispatch_sms};
pub use report::{RecipientDetail, SmsReport, sms_reports};
