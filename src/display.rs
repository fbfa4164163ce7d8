use crate::gateway::Analysis;
use crate::session::{ChatMessage, Sender};
use crate::workspace::Workspace;
use console::style;

/// Render one transcript message. Assistant text that looks like Markdown
/// goes through the Markdown renderer, everything else is printed in a box.
pub fn display_message(message: &ChatMessage) {
    match message.sender {
        Sender::User => {
            println!(
                "\n{} {}  {}",
                style("🧑 YOU").bold().cyan(),
                style(message.at.format("%H:%M")).dim(),
                message.text
            );
        }
        Sender::Ai => {
            println!(
                "\n{} {}",
                style("🤖 ASSISTANT").bold().blue(),
                style(message.at.format("%H:%M")).dim()
            );
            display_reply(&message.text);
        }
    }
}

/// Render a conversational reply.
pub fn display_reply(text: &str) {
    if looks_like_markdown(text) {
        display_markdown(text);
    } else {
        display_boxed(text);
    }
}

pub fn display_markdown(text: &str) {
    let skin = termimad::MadSkin::default();
    skin.print_text(text);
}

/// Render a structured analysis result, resolving entity references to
/// names where the workspace knows them.
pub fn display_analysis(analysis: &Analysis, workspace: &Workspace) {
    match analysis {
        Analysis::Projects(refs) => {
            println!("\n{}", style("📁 MATCHED PROJECTS").bold().blue());
            if refs.is_empty() {
                println!("{}", style("(none)").dim());
            }
            for entity in refs {
                match workspace.project_name(&entity.id) {
                    Some(name) => println!("• {} ({})", style(name).bold(), style(&entity.id).dim()),
                    None => println!("• {}", style(&entity.id).dim()),
                }
            }
        }
        Analysis::Activities(refs) => {
            println!("\n{}", style("📋 MATCHED ACTIVITIES").bold().blue());
            if refs.is_empty() {
                println!("{}", style("(none)").dim());
            }
            for entity in refs {
                match workspace.activity_title(&entity.id) {
                    Some(title) => {
                        println!("• {} ({})", style(title).bold(), style(&entity.id).dim())
                    }
                    None => println!("• {}", style(&entity.id).dim()),
                }
            }
        }
        Analysis::Summary(summary) => {
            println!("\n{}", style("📝 SUMMARY").bold().blue());
            display_reply(summary);
        }
        Analysis::Kpis(kpis) => {
            println!("\n{}", style("📊 KPIS").bold().blue());
            for kpi in kpis {
                println!("{}: {}", style(&kpi.title).bold(), style(&kpi.value).green());
            }
        }
        Analysis::Error(message) => {
            println!(
                "\n{} {}",
                style("⚠️  ANALYSIS FAILED:").bold().red(),
                style(message).red()
            );
        }
    }
}

pub fn display_error(err: &impl std::fmt::Display) {
    eprintln!("{} {}", style("Error:").bold().red(), err);
}

fn looks_like_markdown(text: &str) -> bool {
    text.contains("```") || text.contains('*') || text.contains('`') || text.contains('#')
}

/// Boxed plain-text rendering, responsive to terminal width.
fn display_boxed(text: &str) {
    let term = console::Term::stdout();
    let terminal_width = term.size().1 as usize;
    let max_width = std::cmp::min(terminal_width.saturating_sub(4), 120).max(60);

    let mut wrapped_lines = Vec::new();
    for line in text.lines() {
        wrapped_lines.extend(wrap_line(line, max_width.saturating_sub(4)));
    }

    let content_max_len = wrapped_lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    let box_width = std::cmp::min(max_width, content_max_len + 4).max(4);

    let top_border = "┌".to_string() + &"─".repeat(box_width - 2) + "┐";
    let bottom_border = "└".to_string() + &"─".repeat(box_width - 2) + "┘";

    println!("{}", style(&top_border).dim().blue());
    for line in wrapped_lines {
        let padding = box_width.saturating_sub(line.chars().count() + 3);
        println!("│ {}{}│", style(&line).white(), " ".repeat(padding));
    }
    println!("{}", style(&bottom_border).dim().blue());
}

fn wrap_line(line: &str, max_line_len: usize) -> Vec<String> {
    if line.chars().count() <= max_line_len {
        return vec![line.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        let candidate_len = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if candidate_len > max_line_len && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_lines_are_not_wrapped() {
        assert_eq!(wrap_line("hello world", 20), vec!["hello world"]);
    }

    #[test]
    fn long_lines_break_at_word_boundaries() {
        let wrapped = wrap_line("one two three four five", 9);
        assert_eq!(wrapped, vec!["one two", "three", "four five"]);
    }

    #[test]
    fn markdown_heuristic_matches_fenced_and_styled_text() {
        assert!(looks_like_markdown("# heading"));
        assert!(looks_like_markdown("some `code`"));
        assert!(!looks_like_markdown("plain sentence"));
    }
}
