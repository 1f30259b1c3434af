//! Doctor command: check system requirements.

use crate::cli::Output;
use crate::config::Settings;
use crate::openai::is_api_key_configured;

/// Run the doctor command.
pub async fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Oppsum Doctor");
    println!();

    let mut ok = true;

    // yt-dlp is needed for metadata and caption track listing
    match tokio::process::Command::new("yt-dlp")
        .arg("--version")
        .output()
        .await
    {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
            Output::success(&format!("yt-dlp {}", version));
        }
        _ => {
            Output::error("yt-dlp not found. Install it and ensure it's in your PATH.");
            ok = false;
        }
    }

    if is_api_key_configured() {
        Output::success("OPENAI_API_KEY is set");
    } else {
        Output::error("OPENAI_API_KEY is not set");
        ok = false;
    }

    println!();
    Output::kv("Config file", &Settings::default_config_path().display().to_string());
    Output::kv("Summarization model", &settings.summarization.model);
    Output::kv(
        "Chunk size",
        &settings.chunking.chunk_size.to_string(),
    );

    if !ok {
        anyhow::bail!("Some requirements are missing");
    }

    println!();
    Output::success("All requirements satisfied.");
    Ok(())
}
