use identityuser_installer::logging;
use identityuser_installer::setup::DependencyReport;
use tracing::debug;

// Advisory only: always exits 0
fn main() {
    logging::init(0);

    let report = DependencyReport::check();
    for status in &report.statuses {
        debug!(
            "{}: {} (minimum {})",
            status.name,
            status.version.as_deref().unwrap_or("not declared"),
            status.minimum
        );
    }

    for line in report.notice_lines() {
        eprintln!("{}", line);
    }
}
