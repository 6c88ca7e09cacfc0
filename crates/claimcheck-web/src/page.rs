//! HTML rendering for the verification form.
//!
//! One page serves every state: empty form, guidance, result, or error.
//! The result is escaped for HTML and otherwise shown exactly as returned.

use claimcheck_verifier::{DisplayState, GUIDANCE_MESSAGE, PROGRESS_MESSAGE, SUCCESS_MESSAGE, TITLE};

/// What the output area shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Inputs incomplete
    Guidance,
    /// Model reply
    Result(String),
    /// A failure reported to the user
    Error(String),
}

impl From<DisplayState> for Outcome {
    fn from(state: DisplayState) -> Self {
        match state {
            DisplayState::Pending => Outcome::Guidance,
            DisplayState::Complete(result) => Outcome::Result(result.into_inner()),
        }
    }
}

/// Everything needed to render the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    /// Pasted Section A, echoed back into its text area
    pub claims_text: String,
    /// Pasted Section B, echoed back into its text area
    pub sources_text: String,
    /// Output area content
    pub outcome: Outcome,
}

impl PageView {
    /// A fresh form
    pub fn empty() -> Self {
        Self {
            claims_text: String::new(),
            sources_text: String::new(),
            outcome: Outcome::Guidance,
        }
    }
}

/// Escape text for use in HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn render_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Guidance => format!(r#"<p class="info" id="status">{}</p>"#, GUIDANCE_MESSAGE),
        Outcome::Result(text) => format!(
            concat!(
                r#"<p class="success" id="status">{}</p>"#,
                "\n",
                r#"<label for="output">Output</label>"#,
                "\n",
                r#"<textarea id="output" rows="25" readonly>"#,
                "\n{}</textarea>"
            ),
            SUCCESS_MESSAGE,
            escape_html(text)
        ),
        Outcome::Error(message) => {
            format!(r#"<p class="error" id="status">{}</p>"#, escape_html(message))
        }
    }
}

/// Render the full page
pub fn render(view: &PageView) -> String {
    // Browsers drop one newline directly after a <textarea> start tag, so
    // every textarea body is preceded by one.
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; max-width: 56rem; margin: 2rem auto; padding: 0 1rem; }}
textarea {{ width: 100%; font-family: monospace; }}
.info {{ background: #e8f0fe; padding: .75rem; }}
.success {{ background: #e6f4ea; padding: .75rem; }}
.error {{ background: #fce8e6; padding: .75rem; }}
#progress {{ display: none; }}
</style>
</head>
<body>
<h1>{title}</h1>
<p>You can either <strong>paste</strong> Section A and B directly, or <strong>upload text files</strong> containing them.</p>
<ul>
<li>Section A: AI-generated claims</li>
<li>Section B: Reference sources</li>
</ul>
<form id="verify-form" method="post" action="/verify" enctype="multipart/form-data">
<h2>Section A (Claims)</h2>
<label for="claims_text">Paste Section A content here (overrides upload)</label>
<textarea id="claims_text" name="claims_text" rows="8">
{claims}</textarea>
<label for="claims_file">Or upload Section A (.txt)</label>
<input type="file" id="claims_file" name="claims_file" accept=".txt,text/plain">
<h2>Section B (Sources)</h2>
<label for="sources_text">Paste Section B content here (overrides upload)</label>
<textarea id="sources_text" name="sources_text" rows="10">
{sources}</textarea>
<label for="sources_file">Or upload Section B (.txt)</label>
<input type="file" id="sources_file" name="sources_file" accept=".txt,text/plain">
</form>
<p class="info" id="progress">{progress}</p>
{outcome}
<script>
(function () {{
  var form = document.getElementById("verify-form");
  function present(section) {{
    var text = document.getElementById(section + "_text").value;
    var file = document.getElementById(section + "_file").files;
    return text.length > 0 || (file && file.length > 0);
  }}
  form.addEventListener("change", function () {{
    if (present("claims") && present("sources")) {{
      document.getElementById("progress").style.display = "block";
      form.submit();
    }}
  }});
}})();
</script>
</body>
</html>
"#,
        title = TITLE,
        claims = escape_html(&view.claims_text),
        sources = escape_html(&view.sources_text),
        progress = PROGRESS_MESSAGE,
        outcome = render_outcome(&view.outcome),
    )
}
