//! FastGH - desktop GitHub client

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::process::ExitCode;

#[cfg(target_os = "windows")]
fn main() -> ExitCode {
    use fastgh::instance::NamedInstanceGuard;
    use fastgh::platform::Win32Toolkit;
    use fastgh::{AppContext, AppPaths, Bootstrap, APP_NAME, APP_VERSION};

    let state = AppContext::new(AppPaths::resolve());
    let guard = NamedInstanceGuard::for_current_user(APP_NAME);
    let mut bootstrap = Bootstrap::new(Win32Toolkit::new(), state, guard);

    match bootstrap.run() {
        Ok(outcome) => {
            log::info!("{} {} exiting: {:?}", APP_NAME, APP_VERSION, outcome);
            outcome.exit_code()
        }
        Err(e) => {
            log::error!("FATAL: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(target_os = "windows"))]
fn main() -> ExitCode {
    fastgh::diagnostics::redirect(fastgh::diagnostics::default_target().as_deref());
    log::error!("{} has no native shell for this platform", fastgh::APP_NAME);
    eprintln!("{} has no native shell for this platform", fastgh::APP_NAME);
    ExitCode::FAILURE
}
