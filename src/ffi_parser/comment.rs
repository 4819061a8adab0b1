//! Doc comments attached to exported declarations.

/// Documentation for one exported function
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentBlock {
    /// Free text, one entry per line
    pub summary: String,
    /// `@param name description`, in declaration order
    pub params: Vec<(String, String)>,
    /// `@return description`
    pub returns: Option<String>,
}

/// Find the comment directly above the declaration starting at `decl_start`.
///
/// Walks upward from the declaration's line and stops at the first line that
/// isn't part of a comment (blank lines included).
pub fn find_comment_block(content: &str, decl_start: usize) -> Option<CommentBlock> {
    let mut lines_before: Vec<&str> = content[..decl_start].split('\n').collect();
    // Whatever precedes the declaration on its own line
    lines_before.pop();

    let mut collected = Vec::new();
    let mut in_block = false;

    for line in lines_before.iter().rev() {
        if !in_block {
            if line.contains("*/") {
                collected.push(*line);
                if line.contains("/*") {
                    return Some(parse_one_line_block(line));
                }
                in_block = true;
            } else if line.contains("//") {
                collected.push(*line);
            } else {
                break;
            }
        } else {
            collected.push(*line);
            if line.contains("/*") {
                break;
            }
        }
    }

    if collected.is_empty() {
        return None;
    }

    collected.reverse();
    let text = collected.join("\n");

    if in_block {
        Some(parse_block_comment(&text))
    } else {
        Some(parse_line_comments(&text))
    }
}

/// `/**  Multiply two integers **/`
fn parse_one_line_block(line: &str) -> CommentBlock {
    CommentBlock {
        summary: strip_block_markers(line).trim().to_string(),
        ..Default::default()
    }
}

/// A `/** ... */` block with optional `@param` and `@return` tags
fn parse_block_comment(text: &str) -> CommentBlock {
    let body = strip_block_markers(text);

    let mut summary = Vec::new();
    let mut params = Vec::new();
    let mut returns = None;

    for line in body.trim().lines() {
        let line = line.trim().trim_matches('*').trim();

        if let Some(rest) = line.strip_prefix("@param") {
            let rest = rest.trim();
            let (name, desc) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            params.push((name.to_string(), desc.trim().to_string()));
        } else if let Some(rest) = line
            .strip_prefix("@returns")
            .or_else(|| line.strip_prefix("@return"))
        {
            returns = Some(rest.trim().to_string());
        } else {
            summary.push(line);
        }
    }

    CommentBlock {
        summary: join_trimmed(&summary),
        params,
        returns,
    }
}

/// A run of `//` lines. Only the leading marker goes, so `a // b` survives.
fn parse_line_comments(text: &str) -> CommentBlock {
    let lines: Vec<&str> = text
        .lines()
        .map(|line| match line.find("//") {
            Some(pos) => line[pos..].trim_start_matches('/').trim(),
            None => line.trim(),
        })
        .collect();

    CommentBlock {
        summary: join_trimmed(&lines),
        ..Default::default()
    }
}

/// Remove the first `/*…` opener and the first `…*/` closer
fn strip_block_markers(text: &str) -> String {
    let mut text = text.to_string();

    if let Some(start) = text.find("/*") {
        let rest = text[start + 2..].trim_start_matches('*').to_string();
        text = format!("{}{}", &text[..start], rest);
    }

    if let Some(end) = text.find("*/") {
        let head = text[..end].trim_end_matches('*').to_string();
        text = format!("{}{}", head, &text[end + 2..]);
    }

    text
}

/// Join lines, dropping blank lines at either end
fn join_trimmed(lines: &[&str]) -> String {
    let start = lines.iter().position(|l| !l.is_empty()).unwrap_or(lines.len());
    let end = lines.iter().rposition(|l| !l.is_empty()).map_or(start, |i| i + 1);
    lines[start..end].join("\n")
}
