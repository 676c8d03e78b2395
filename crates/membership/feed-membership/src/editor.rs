//! Splices DIDs in and out of the membership list.
//!
//! The membership file is a TypeScript source file containing array literals
//! of DIDs, one per line. The array we edit is the one whose body contains the
//! `DID_ADDITIONS` marker comment:
//!
//! ```text
//! export const membership = [
//!   // DID_ADDITIONS
//!   'did:plc:j4bko7yvzthmufkoxtzcoauh',
//! ]
//! ```
//!
//! The file is cut on every `\n]\n` (the closing bracket of a top level array),
//! and the first section containing the marker gets the new entry appended.
//! All functions here are pure; [crate::file::MembershipFile] does the I/O.

use tracing::{debug, warn};

use crate::errors::MembershipError;

/// Closing bracket of a top level array literal
pub const ENDING_BRACKET_DELIMITER: &str = "\n]\n";

/// Comment that tags the array new DIDs are appended to
pub const DID_ADDITIONS_MARKER: &str = "DID_ADDITIONS";

#[derive(Debug, PartialEq, Eq)]
pub enum AddOutcome {
    /// Content with the new entry spliced in
    Added(String),
    /// The DID already appears somewhere in the file, nothing to do
    AlreadyPresent,
}

#[derive(Debug, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// Content with the entry line removed
    Removed(String),
    /// No entry line for the DID in the marked section
    NotPresent,
}

/// A list entry as it appears in the file: `  '<did>',`
pub fn format_entry(did: &str) -> String {
    format!("  '{did}',")
}

/// Appends `did` to the marked section of `content`.
///
/// The duplicate check is a plain substring match over the whole file, so a
/// DID that is mentioned anywhere (including other lists or comments) counts
/// as present.
pub fn add_member(content: &str, did: &str) -> Result<AddOutcome, MembershipError> {
    if content.contains(did) {
        debug!("did ({did}) already present");
        return Ok(AddOutcome::AlreadyPresent);
    }

    let mut sections: Vec<String> = content
        .split(ENDING_BRACKET_DELIMITER)
        .map(str::to_string)
        .collect();
    let index = marked_section(&sections)?;

    let section = &mut sections[index];
    section.push('\n');
    section.push_str(&format_entry(did));
    debug!("appended did ({did}) to section {index}");

    Ok(AddOutcome::Added(sections.join(ENDING_BRACKET_DELIMITER)))
}

/// Removes the entry line for `did` from the marked section of `content`.
///
/// Only lines that are exactly the entry (ignoring surrounding whitespace) are
/// removed. Mentions of the DID elsewhere are left alone.
pub fn remove_member(content: &str, did: &str) -> Result<RemoveOutcome, MembershipError> {
    let mut sections: Vec<String> = content
        .split(ENDING_BRACKET_DELIMITER)
        .map(str::to_string)
        .collect();
    let index = marked_section(&sections)?;

    let entry = format_entry(did);
    let entry = entry.trim();
    let lines: Vec<&str> = sections[index].split('\n').collect();
    let kept: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|line| line.trim() != entry)
        .collect();

    if kept.len() == lines.len() {
        debug!("did ({did}) has no entry in section {index}");
        return Ok(RemoveOutcome::NotPresent);
    }

    sections[index] = kept.join("\n");
    debug!("removed did ({did}) from section {index}");
    Ok(RemoveOutcome::Removed(sections.join(ENDING_BRACKET_DELIMITER)))
}

/// Finds the section to edit: the first one containing the marker.
///
/// The last section is whatever follows the final `\n]\n`, so a marker found
/// there sits in a list that is never closed and appending to it would write
/// past the end of the array.
fn marked_section(sections: &[String]) -> Result<usize, MembershipError> {
    let mut marked = sections
        .iter()
        .enumerate()
        .filter(|(_, section)| section.contains(DID_ADDITIONS_MARKER))
        .map(|(index, _)| index);

    let index = marked.next().ok_or(MembershipError::MarkerNotFound {
        marker: DID_ADDITIONS_MARKER,
    })?;

    let others = marked.count();
    if others > 0 {
        warn!(
            "{DID_ADDITIONS_MARKER} appears in {} sections, only the first is edited",
            others + 1
        );
    }

    if index == sections.len() - 1 {
        return Err(MembershipError::UnterminatedSection {
            marker: DID_ADDITIONS_MARKER,
        });
    }

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DID: &str = "did:plc:xum72mip7ti5niwqbgpvaqn4";

    const MEMBERSHIP: &str = "\
export const removals = [
  'did:plc:buofnbcavecxm3kr6x5npusi',
]

export const membership = [
  // DID_ADDITIONS
  'did:plc:j4bko7yvzthmufkoxtzcoauh',
  'did:plc:l4g436iw6lmd7ywrqz4lko5w',
]

export default membership
";

    #[test]
    fn add_appends_entry_to_marked_section() {
        let AddOutcome::Added(updated) = add_member(MEMBERSHIP, DID).unwrap() else {
            panic!("expected the DID to be added");
        };

        let expected = MEMBERSHIP.replace(
            "  'did:plc:l4g436iw6lmd7ywrqz4lko5w',\n]",
            "  'did:plc:l4g436iw6lmd7ywrqz4lko5w',\n  'did:plc:xum72mip7ti5niwqbgpvaqn4',\n]",
        );
        assert_eq!(updated, expected);
    }

    #[test]
    fn add_only_touches_one_line() {
        let AddOutcome::Added(updated) = add_member(MEMBERSHIP, DID).unwrap() else {
            panic!("expected the DID to be added");
        };

        let before: Vec<&str> = MEMBERSHIP.lines().collect();
        let after: Vec<&str> = updated.lines().collect();
        assert_eq!(after.len(), before.len() + 1);

        let inserted = after.iter().position(|l| l.contains(DID)).unwrap();
        assert_eq!(after[inserted], "  'did:plc:xum72mip7ti5niwqbgpvaqn4',");
        assert_eq!(after[inserted + 1], "]");
        let mut without: Vec<&str> = after.clone();
        without.remove(inserted);
        assert_eq!(without, before);
    }

    #[test]
    fn add_existing_did_is_a_noop() {
        assert_eq!(
            add_member(MEMBERSHIP, "did:plc:j4bko7yvzthmufkoxtzcoauh").unwrap(),
            AddOutcome::AlreadyPresent
        );
    }

    #[test]
    fn add_is_idempotent() {
        let AddOutcome::Added(once) = add_member(MEMBERSHIP, DID).unwrap() else {
            panic!("expected the DID to be added");
        };
        assert_eq!(add_member(&once, DID).unwrap(), AddOutcome::AlreadyPresent);
    }

    #[test]
    fn did_mentioned_outside_the_list_counts_as_present() {
        // Removal list lives in a different section but still blocks the add
        assert_eq!(
            add_member(MEMBERSHIP, "did:plc:buofnbcavecxm3kr6x5npusi").unwrap(),
            AddOutcome::AlreadyPresent
        );
    }

    #[test]
    fn missing_marker_is_an_error() {
        let content = "export const membership = [\n  'did:plc:aaa',\n]\n";
        assert!(matches!(
            add_member(content, DID),
            Err(MembershipError::MarkerNotFound { .. })
        ));
    }

    #[test]
    fn unterminated_marked_list_is_an_error() {
        let content = "export const membership = [\n  // DID_ADDITIONS\n  'did:plc:aaa',\n]";
        assert!(matches!(
            add_member(content, DID),
            Err(MembershipError::UnterminatedSection { .. })
        ));
    }

    #[test]
    fn only_first_marked_section_is_edited() {
        let content = "\
const a = [
  // DID_ADDITIONS
]
const b = [
  // DID_ADDITIONS
]
";
        let AddOutcome::Added(updated) = add_member(content, DID).unwrap() else {
            panic!("expected the DID to be added");
        };
        assert_eq!(updated.matches(DID).count(), 1);
        assert!(updated.starts_with(
            "const a = [\n  // DID_ADDITIONS\n  'did:plc:xum72mip7ti5niwqbgpvaqn4',\n]\n"
        ));
    }

    #[test]
    fn remove_deletes_entry_line() {
        let outcome = remove_member(MEMBERSHIP, "did:plc:j4bko7yvzthmufkoxtzcoauh").unwrap();
        let RemoveOutcome::Removed(updated) = outcome else {
            panic!("expected the DID to be removed");
        };
        assert_eq!(
            updated,
            MEMBERSHIP.replace("  'did:plc:j4bko7yvzthmufkoxtzcoauh',\n", "")
        );
    }

    #[test]
    fn remove_ignores_other_sections() {
        assert_eq!(
            remove_member(MEMBERSHIP, "did:plc:buofnbcavecxm3kr6x5npusi").unwrap(),
            RemoveOutcome::NotPresent
        );
    }

    #[test]
    fn add_then_remove_round_trips() {
        let AddOutcome::Added(added) = add_member(MEMBERSHIP, DID).unwrap() else {
            panic!("expected the DID to be added");
        };
        assert_eq!(
            remove_member(&added, DID).unwrap(),
            RemoveOutcome::Removed(MEMBERSHIP.to_string())
        );
    }
}
