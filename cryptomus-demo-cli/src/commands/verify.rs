//! Verify-webhook command - check the signature of a saved callback body

use std::path::Path;

use anyhow::{Context, Result};
use cryptomus_lib::{verify_sign, verify_sign_escaped, ApiSurface};

use crate::ui;

pub fn run(file: &Path, surface: ApiSurface, escape_slashes: bool) -> Result<()> {
    let body = std::fs::read(file)
        .with_context(|| format!("Failed to read webhook body from {}", file.display()))?;

    let config = super::load_config(None)?;
    let key = config.key_for(surface);

    let outcome = if escape_slashes {
        verify_sign_escaped(key, &body)
    } else {
        verify_sign(key, &body)
    };

    match outcome {
        Ok(()) => {
            ui::success(&format!("Signature valid ({} key)", surface));
            Ok(())
        }
        Err(err) => {
            ui::error(&format!("Signature check failed: {}", err));
            Err(err).context("Webhook verification failed")
        }
    }
}
