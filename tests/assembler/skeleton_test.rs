//! Skeleton integrity checks.

use proposal_generator::error::PlaceholderProblem;
use proposal_generator::layout::{compose, DocumentParts, Placeholder, Skeleton};
use proposal_generator::ProposalError;

fn braced(placeholder: Placeholder) -> String {
    format!("{{{{{}}}}}", placeholder.token())
}

fn full_skeleton() -> String {
    Placeholder::ALL
        .iter()
        .map(|p| format!("<div>{}</div>", braced(*p)))
        .collect()
}

fn problem(source: &str) -> Option<(String, PlaceholderProblem)> {
    match Skeleton::parse(source) {
        Err(ProposalError::TemplateIntegrity { token, problem }) => Some((token, problem)),
        _ => None,
    }
}

#[test]
fn complete_skeleton_composes_cleanly() {
    let skeleton = Skeleton::parse(&full_skeleton()).expect("valid skeleton");
    let html = compose(&skeleton, &DocumentParts::default());
    assert!(!html.contains("{{"));
    assert_eq!(html.matches("<div></div>").count(), Placeholder::ALL.len());
}

#[test]
fn each_missing_placeholder_is_reported() {
    for missing in Placeholder::ALL {
        let source = full_skeleton().replace(&braced(missing), "");
        let (token, kind) = problem(&source).expect("integrity error");
        assert_eq!(kind, PlaceholderProblem::Missing);
        assert_eq!(token, missing.token());
    }
}

#[test]
fn duplicate_placeholder_is_reported() {
    let source = format!("{}{}", full_skeleton(), braced(Placeholder::Sections));
    let (token, kind) = problem(&source).expect("integrity error");
    assert_eq!(kind, PlaceholderProblem::Duplicated);
    assert_eq!(token, "SECTIONS");
}

#[test]
fn unknown_placeholder_is_reported() {
    let source = format!("{}{{{{CLIENT_NAME}}}}", full_skeleton());
    let (token, kind) = problem(&source).expect("integrity error");
    assert_eq!(kind, PlaceholderProblem::Unknown);
    assert_eq!(token, "CLIENT_NAME");
}

#[test]
fn no_token_name_contains_another() {
    for a in Placeholder::ALL {
        for b in Placeholder::ALL {
            if a != b {
                assert!(!a.token().contains(b.token()));
            }
        }
    }
}
