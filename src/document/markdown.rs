//! Minimal markdown to HTML renderer
//!
//! The supported dialect is small and the rules run in a fixed order over the
//! whole text:
//!
//! 1. `#`, `##`, `###` headers
//! 2. `**bold**`
//! 3. `*italic*` (after bold so `**` is never read as two italics)
//! 4. `[text](url)` links
//! 5. `*` list items, grouped into `<ul>` by a two-state scanner
//! 6. `<p>` wrapping of lines that are not block level
//! 7. newline removal
//!
//! Input is not escaped. Markup in a post reaches the output as written.
//!
//! Whitespace-only lines are dropped like empty ones, so `"text\n\n   \n\nmore"`
//! renders as `<p>text</p><p>more</p>`. Pages rendered by older builds of this
//! blog carried those spaces into the next paragraph (`<p>   more</p>`).

use std::sync::LazyLock;

static INLINE_RULES: LazyLock<Vec<(regex::Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"(?m)^# (.*)$", "<h1>${1}</h1>"),
        (r"(?m)^## (.*)$", "<h2>${1}</h2>"),
        (r"(?m)^### (.*)$", "<h3>${1}</h3>"),
        (r"\*\*(.*?)\*\*", "<strong>${1}</strong>"),
        (r"\*(.*?)\*", "<em>${1}</em>"),
        (r"\[([^\]]+)\]\(([^)]+)\)", r#"<a href="${2}">${1}</a>"#),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (regex::Regex::new(pattern).unwrap(), replacement))
    .collect()
});

static BLOCK_TAG: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"</?(h\d|ul|ol|li|blockquote|pre|img)").unwrap());

/// Render a post body to a single line of HTML.
pub fn render(body: &str) -> String {
    let normalized = body.replace("\r\n", "\n");
    let inline = INLINE_RULES
        .iter()
        .fold(normalized, |text, (pattern, replacement)| {
            pattern.replace_all(&text, *replacement).into_owned()
        });
    let blocks = group_list_items(&inline);
    wrap_paragraphs(&blocks)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListState {
    Outside,
    Inside,
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn list_item(line: &str) -> Option<&str> {
    line.strip_prefix('*').filter(|rest| !rest.is_empty())
}

/// Turn `*` lines into `<li>` and open/close `<ul>` around them.
///
/// A list only opens on a blank line directly followed by an item. Items that
/// do not follow a blank line still become `<li>` but get no `<ul>`.
fn group_list_items(text: &str) -> Vec<String> {
    let lines = text.split('\n').collect::<Vec<_>>();
    let mut state = ListState::Outside;
    let mut out = Vec::with_capacity(lines.len());
    for (index, line) in lines.iter().enumerate() {
        if let Some(item) = list_item(line) {
            out.push(format!("<li>{item}</li>"));
            continue;
        }
        if state == ListState::Inside {
            out.push("</ul>".to_owned());
            state = ListState::Outside;
        }
        let opens_list = is_blank(line)
            && lines
                .get(index + 1)
                .is_some_and(|next| list_item(next).is_some());
        if opens_list {
            out.push("<ul>".to_owned());
            state = ListState::Inside;
        } else {
            out.push((*line).to_owned());
        }
    }
    if state == ListState::Inside {
        out.push("</ul>".to_owned());
    }
    out
}

fn wrap_paragraphs(lines: &[String]) -> String {
    lines
        .iter()
        .filter(|line| !is_blank(line))
        .map(|line| {
            if BLOCK_TAG.is_match(line) {
                line.clone()
            } else {
                format!("<p>{line}</p>")
            }
        })
        .collect()
}
