//! Fragment assembly.

use regex::Regex;

/// Join fragments with document-flow spacing and collapse excess blank
/// lines.
///
/// Fragments are joined with a blank line between them; any run of three
/// or more newlines — blank lines embedded in paragraph text plus the
/// separator itself — is collapsed back to exactly two. Deterministic and
/// total.
pub fn assemble(fragments: &[String]) -> String {
    let joined = fragments.join("\n\n");
    let re = Regex::new(r"\n{3,}").unwrap();
    re.replace_all(&joined, "\n\n").to_string()
}
