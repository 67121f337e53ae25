//! Server-rendered HTML form for interactive use.

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::Html,
};

use crate::api::models::SummarizeForm;
use crate::api::routes::process_request;
use crate::config::{Config, APP_NAME, APP_VERSION};
use crate::error::{AppError, Result};
use crate::model::{Method, SummarizationResult};
use crate::AppState;

pub async fn form_page(State(state): State<AppState>) -> Html<String> {
    Html(render_page(&SummarizeForm::default(), &state.config, None))
}

pub async fn submit_form(
    State(state): State<AppState>,
    Form(form): Form<SummarizeForm>,
) -> (StatusCode, Html<String>) {
    let outcome = match parse_form(&form) {
        Ok((method, limit)) => process_request(&state, &form.text, method, limit, Some(form.reference.as_str())).await,
        Err(err) => Err(err),
    };

    let status = match &outcome {
        Ok(_) => StatusCode::OK,
        Err(err) => err.status_code(),
    };
    (status, Html(render_page(&form, &state.config, Some(&outcome))))
}

fn parse_form(form: &SummarizeForm) -> Result<(Method, Option<usize>)> {
    let method = if form.method.trim().is_empty() {
        Method::default()
    } else {
        form.method.parse::<Method>()?
    };

    let limit = match (method, form.num_sentences.trim()) {
        (Method::Abstractive, _) | (_, "") => None,
        (Method::Extractive, raw) => Some(raw.parse::<usize>().map_err(|_| {
            AppError::Validation(format!("Number of sentences must be a whole number, got '{}'", raw))
        })?),
    };
    Ok((method, limit))
}

fn render_page(
    form: &SummarizeForm,
    config: &Config,
    outcome: Option<&Result<SummarizationResult>>,
) -> String {
    let abstractive = form.method.trim().eq_ignore_ascii_case("abstractive");
    let num_sentences = if form.num_sentences.trim().is_empty() {
        config.default_num_sentences.to_string()
    } else {
        form.num_sentences.trim().to_string()
    };

    let result_section = match outcome {
        None => String::new(),
        Some(Err(err)) => format!(
            "<div class=\"error\">{}</div>",
            escape_html(&err.to_string())
        ),
        Some(Ok(result)) => render_result(result),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{app}</title>
<style>
body {{ font-family: sans-serif; max-width: 860px; margin: 2rem auto; padding: 0 1rem; }}
textarea {{ width: 100%; }}
.error {{ color: #a40000; margin-top: 1rem; }}
.summary {{ background: #f4f4f4; padding: 1rem; }}
table {{ border-collapse: collapse; }}
td, th {{ border: 1px solid #ccc; padding: 0.3rem 0.6rem; }}
</style>
</head>
<body>
<h1>Text Summarization App</h1>
<form method="post" action="/">
<label for="text">Enter the article text:</label>
<textarea id="text" name="text" rows="14">{text}</textarea>
<label for="reference">Enter the reference summary (optional, for ROUGE evaluation):</label>
<textarea id="reference" name="reference" rows="4">{reference}</textarea>
<p>
<label><input type="radio" name="method" value="extractive"{extractive_checked}> Extractive</label>
<label><input type="radio" name="method" value="abstractive"{abstractive_checked}> Abstractive</label>
<label>Sentences: <input type="number" name="num_sentences" min="{min_sentences}" max="{max_sentences}" value="{num_sentences}"></label>
</p>
<button type="submit">Summarize</button>
</form>
{result_section}
<hr>
<small>{app} {version}</small>
</body>
</html>
"#,
        app = APP_NAME,
        version = APP_VERSION,
        text = escape_html(&form.text),
        reference = escape_html(&form.reference),
        extractive_checked = if abstractive { "" } else { " checked" },
        abstractive_checked = if abstractive { " checked" } else { "" },
        min_sentences = config.min_num_sentences,
        max_sentences = config.max_num_sentences,
        num_sentences = escape_html(&num_sentences),
        result_section = result_section,
    )
}

fn render_result(result: &SummarizationResult) -> String {
    let mut html = format!(
        "<h2>Generated Summary</h2>\n<div class=\"summary\">{}</div>\n",
        escape_html(&result.summary)
    );

    if let Some(scores) = &result.scores {
        html.push_str("<h2>ROUGE Scores</h2>\n<table>\n<tr><th>Metric</th><th>F1</th><th>Precision</th><th>Recall</th></tr>\n");
        for (name, score) in scores.entries() {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{:.3}</td><td>{:.3}</td><td>{:.3}</td></tr>\n",
                name, score.f1, score.precision, score.recall
            ));
        }
        html.push_str("</table>\n");
    }
    html
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rouge;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<script>alert('x') & \"y\"</script>"),
            "&lt;script&gt;alert(&#39;x&#39;) &amp; &quot;y&quot;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_parse_form() {
        let form = SummarizeForm {
            method: "abstractive".into(),
            num_sentences: "5".into(),
            ..SummarizeForm::default()
        };
        assert_eq!(parse_form(&form).unwrap(), (Method::Abstractive, None));

        let form = SummarizeForm {
            num_sentences: "4".into(),
            ..SummarizeForm::default()
        };
        assert_eq!(parse_form(&form).unwrap(), (Method::Extractive, Some(4)));

        let form = SummarizeForm {
            num_sentences: "four".into(),
            ..SummarizeForm::default()
        };
        assert!(matches!(parse_form(&form), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_render_result_with_scores() {
        let result = SummarizationResult {
            summary: "A <b>bold</b> claim.".to_string(),
            method: Method::Extractive,
            cached: false,
            scores: Some(rouge::score("a bold claim", "a bold claim")),
        };
        let html = render_result(&result);
        assert!(html.contains("A &lt;b&gt;bold&lt;/b&gt; claim."));
        assert!(html.contains("<td>rougeL</td><td>1.000</td>"));
    }

    #[test]
    fn test_render_page_keeps_input() {
        let form = SummarizeForm {
            text: "Keep </textarea> me".into(),
            method: "abstractive".into(),
            ..SummarizeForm::default()
        };
        let html = render_page(&form, &Config::default(), None);
        assert!(html.contains("Keep &lt;/textarea&gt; me"));
        assert!(html.contains("value=\"abstractive\" checked"));
        assert!(html.contains("min=\"1\" max=\"10\" value=\"3\""));
    }

    #[test]
    fn test_sentence_input_follows_configured_bounds() {
        let config = Config {
            min_num_sentences: 2,
            max_num_sentences: 5,
            default_num_sentences: 4,
            ..Config::default()
        };
        let html = render_page(&SummarizeForm::default(), &config, None);
        assert!(html.contains("name=\"num_sentences\" min=\"2\" max=\"5\" value=\"4\""));
    }
}
