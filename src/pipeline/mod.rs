//! Pipeline entry points for monitor operations.
//!
//! - `run_monitor`: Fetch, fingerprint and compare every site, then alert
//! - `run_probe`: Print the focus window of a single page
//! - `run_fingerprint_file`: Fingerprint a saved focus window
//! - `run_validate`: Check configuration and site list

pub mod detect;
mod extract;
mod fingerprint;
pub mod notify;
pub mod probe;
pub mod run;
pub mod validate;

pub use detect::{ChangeDetector, Detection, SiteOutcome, SiteStatus};
pub use extract::extract;
pub use fingerprint::fingerprint;
pub use notify::{ALERT_SUBJECT, Notifier, NotifyOutcome};
pub use probe::{run_fingerprint_file, run_probe};
pub use run::{RunReport, run_monitor};
pub use validate::run_validate;
