//! Playwright-driven demo recording
//!
//! The recorder generates a Node script, runs it with `node`, and collects
//! the video file(s) Playwright wrote. The generated script owns a browser
//! process and a recording context; both are closed on the success path and
//! on the failure path so a failed run never leaves a headless browser
//! behind.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use tokio::process::Command as TokioCommand;
use tracing::{debug, info, warn};

use crate::error::{DemoError, DemoResult};
use crate::script::{DemoScript, DemoStep};

/// Records a scripted browser session to a video file
pub struct DemoRecorder {
    base_url: String,
    video_dir: PathBuf,
    headless: bool,
}

/// Configuration for the recorder
#[derive(Debug, Clone)]
pub struct RecorderConfig {
    /// Base URL of the running server
    pub base_url: String,

    /// Directory the recording is written to (created on demand)
    pub video_dir: PathBuf,

    pub headless: bool,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3001".to_string(),
            video_dir: PathBuf::from("videos"),
            headless: true,
        }
    }
}

impl DemoRecorder {
    /// Create a new recorder, verifying Playwright is available.
    pub fn new(config: RecorderConfig) -> DemoResult<Self> {
        Self::check_playwright_installed()?;

        std::fs::create_dir_all(&config.video_dir)?;
        // Playwright resolves the recordVideo dir relative to its own cwd,
        // which is a temp dir here, so the configured path must be absolute.
        let video_dir = config.video_dir.canonicalize()?;

        Ok(Self {
            base_url: config.base_url,
            video_dir,
            headless: config.headless,
        })
    }

    /// Check if Playwright is installed
    fn check_playwright_installed() -> DemoResult<()> {
        let output = Command::new("npx")
            .args(["playwright", "--version"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match output {
            Ok(status) if status.success() => Ok(()),
            _ => Err(DemoError::PlaywrightNotFound),
        }
    }

    /// Record the script and return the paths of the video file(s) written.
    pub async fn record(&self, script: &DemoScript) -> DemoResult<Vec<PathBuf>> {
        info!("Recording demo '{}'", script.name);

        let js = self.build_script(script);
        self.run_script(&js).await?;

        let videos = self.find_videos();
        if videos.is_empty() {
            warn!("No .webm files found in {}", self.video_dir.display());
        }
        Ok(videos)
    }

    /// Build the Node script for a demo run.
    pub fn build_script(&self, script: &DemoScript) -> String {
        let mut js = String::new();

        js.push_str(&format!(
            r#"const {{ chromium }} = require('playwright');

(async () => {{
  const browser = await chromium.launch({{ headless: {headless} }});
  const context = await browser.newContext({{
    viewport: {{ width: {width}, height: {height} }},
    recordVideo: {{ dir: '{video_dir}', size: {{ width: {width}, height: {height} }} }}
  }});
  const page = await context.newPage();
  const baseUrl = '{base_url}';

  try {{
"#,
            headless = self.headless,
            width = script.viewport.width,
            height = script.viewport.height,
            video_dir = self.video_dir.display(),
            base_url = self.base_url,
        ));

        for (i, step) in script.steps.iter().enumerate() {
            js.push_str(&format!("\n    // Step {}\n", i + 1));
            js.push_str(&step_to_js(step));
            js.push('\n');
        }

        // The context must be closed before the browser so the recording is
        // flushed to disk; the failure path tears both down before exiting
        // non-zero.
        js.push_str(
            r#"  } catch (error) {
    console.error(JSON.stringify({ success: false, error: error.message }));
    await context.close();
    await browser.close();
    process.exit(1);
  }

  for (const p of context.pages()) await p.close();
  await context.close();
  await browser.close();
  console.log(JSON.stringify({ success: true }));
})();
"#,
        );

        js
    }

    /// Execute the generated script via node.
    async fn run_script(&self, script: &str) -> DemoResult<()> {
        let temp_dir = tempfile::tempdir()?;
        let script_path = temp_dir.path().join("demo.js");
        std::fs::write(&script_path, script)?;

        debug!("Running recording script: {}", script_path.display());

        let output = TokioCommand::new("node")
            .arg(&script_path)
            .current_dir(temp_dir.path())
            .output()
            .await?;

        if !output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DemoError::Recording(format!(
                "Script failed:\nstdout: {}\nstderr: {}",
                stdout, stderr
            )));
        }

        Ok(())
    }

    /// Locate the recording(s) Playwright wrote under the video directory.
    fn find_videos(&self) -> Vec<PathBuf> {
        walkdir::WalkDir::new(&self.video_dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext == "webm")
                    .unwrap_or(false)
            })
            .map(|e| e.path().to_path_buf())
            .collect()
    }
}

/// Convert a step to JavaScript code
fn step_to_js(step: &DemoStep) -> String {
    match step {
        DemoStep::Navigate { url } => {
            format!(r#"    await page.goto(baseUrl + '{}');"#, url)
        }
        DemoStep::Sleep { ms } => {
            format!(r#"    await page.waitForTimeout({});"#, ms)
        }
        DemoStep::Click {
            selector,
            timeout_ms,
        } => {
            let timeout = timeout_ms.unwrap_or(5000);
            format!(
                r#"    await page.click('{}', {{ timeout: {} }});"#,
                selector, timeout
            )
        }
        DemoStep::Log { message } => {
            format!(r#"    console.log('[DEMO] {}');"#, message.replace('\'', "\\'"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::Viewport;

    fn recorder() -> DemoRecorder {
        DemoRecorder {
            base_url: "http://127.0.0.1:3001".to_string(),
            video_dir: PathBuf::from("/tmp/deskmate-videos"),
            headless: true,
        }
    }

    #[test]
    fn script_records_video_into_the_configured_dir() {
        let js = recorder().build_script(&DemoScript::builtin());
        assert!(js.contains("recordVideo: { dir: '/tmp/deskmate-videos'"));
        assert!(js.contains("headless: true"));
    }

    #[test]
    fn script_contains_every_click_target() {
        let js = recorder().build_script(&DemoScript::builtin());
        for selector in ["#ask-schedule", "#ask-health", "#toggle-light"] {
            assert!(js.contains(selector), "missing {selector}");
        }
    }

    #[test]
    fn script_flushes_recording_before_closing_browser() {
        let js = recorder().build_script(&DemoScript::builtin());

        let tail = js.rsplit("} catch").next().unwrap();
        let context_close = tail.rfind("await context.close();").unwrap();
        let browser_close = tail.rfind("await browser.close();").unwrap();
        assert!(context_close < browser_close);
    }

    #[test]
    fn script_tears_down_on_failure_and_exits_nonzero() {
        let js = recorder().build_script(&DemoScript::builtin());

        let catch_block = js.split("catch (error)").nth(1).unwrap();
        let failure_tail = catch_block.split("process.exit(1)").next().unwrap();
        assert!(failure_tail.contains("await context.close();"));
        assert!(failure_tail.contains("await browser.close();"));
    }

    #[test]
    fn log_messages_escape_single_quotes() {
        let js = step_to_js(&DemoStep::Log {
            message: "what's next".to_string(),
        });
        assert!(js.contains(r"what\'s next"));
    }

    #[test]
    fn viewport_comes_from_the_script() {
        let mut script = DemoScript::builtin();
        script.viewport = Viewport {
            width: 1920,
            height: 1080,
        };

        let js = recorder().build_script(&script);
        assert!(js.contains("width: 1920, height: 1080"));
    }
}
