//! Terminal front-end: prints each screen the view passes through.

use std::{
    future::Future,
    io::{self, Write},
    sync::Arc,
};

use anyhow::{Context, Result};
use client_core::{fetch_until_cancelled, CatalogSource};

use crate::backend_bridge::runtime::source_from_settings;
use crate::config::Settings;
use crate::controller::{events::UiEvent, ViewController};
use crate::ui::list_view::Screen;

/// Mounts one view on a current-thread runtime and prints it before and after the fetch settles.
pub fn run(settings: &Settings, out: &mut impl Write) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build headless runtime")?;
    let source = source_from_settings(settings);
    tracing::info!(source = %source.describe(), "headless catalog view starting");

    runtime.block_on(mount_and_render(
        settings,
        source,
        tokio::signal::ctrl_c(),
        out,
    ))
}

/// Tears the view down when `interrupt` resolves `Ok`. An `Err` only disables that branch.
async fn mount_and_render(
    settings: &Settings,
    source: Arc<dyn CatalogSource>,
    interrupt: impl Future<Output = io::Result<()>>,
    out: &mut impl Write,
) -> Result<()> {
    let mut controller = ViewController::new(settings.failure_policy);
    let request = controller.mount();
    writeln!(out, "{}", controller.screen().render_text())?;

    let fetch = fetch_until_cancelled(source.as_ref(), &request.cancel);
    let settled = tokio::select! {
        settled = fetch => settled,
        Ok(()) = interrupt => {
            controller.teardown();
            None
        }
    };

    let Some(result) = settled else {
        tracing::info!("catalog view torn down before the fetch settled");
        return Ok(());
    };

    controller.handle(UiEvent::from_fetch(request.request_id, result));
    let screen = controller.screen();
    if let Screen::List(view) = &screen {
        tracing::info!(rows = view.len(), "catalog rendered");
    }
    writeln!(out, "{}", screen.render_text())?;
    controller.teardown();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::FailurePolicy;

    fn fast_settings() -> Settings {
        Settings {
            fetch_delay_ms: 5,
            ..Settings::default()
        }
    }

    #[test]
    fn prints_loading_then_catalog() {
        let mut out = Vec::new();
        run(&fast_settings(), &mut out).expect("headless run");

        let text = String::from_utf8(out).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], crate::ui::list_view::LOADING_TEXT);
        assert_eq!(lines[1], "React Book - $32.50");
        assert_eq!(lines[10], "HTML and CSS Book (Responsive Design) - $49.99");
    }

    #[tokio::test]
    async fn unavailable_interrupt_still_prints_catalog() {
        let settings = fast_settings();
        let source = source_from_settings(&settings);
        let interrupt = async { Err(io::Error::other("signal handler unavailable")) };

        let mut out = Vec::new();
        mount_and_render(&settings, source, interrupt, &mut out)
            .await
            .expect("headless render");

        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text.lines().count(), 11);
        assert_eq!(text.lines().nth(1), Some("React Book - $32.50"));
    }

    #[tokio::test]
    async fn interrupt_before_settlement_skips_list() {
        let settings = Settings {
            fetch_delay_ms: 30_000,
            ..Settings::default()
        };
        let source = source_from_settings(&settings);

        let mut out = Vec::new();
        mount_and_render(&settings, source, async { Ok(()) }, &mut out)
            .await
            .expect("headless render");

        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text, format!("{}\n", crate::ui::list_view::LOADING_TEXT));
    }

    #[test]
    fn failed_fetch_prints_empty_list() {
        let settings = Settings {
            simulate_failure: true,
            failure_policy: FailurePolicy::Transition,
            ..fast_settings()
        };
        let mut out = Vec::new();
        run(&settings, &mut out).expect("headless run");

        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text, format!("{}\n\n", crate::ui::list_view::LOADING_TEXT));
    }
}
