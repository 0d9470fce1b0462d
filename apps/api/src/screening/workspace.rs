//! The recruiter's in-memory working set.
//!
//! Holds the loaded documents in display order, the match results of the
//! most recent filter run, and the ordered candidate selection. Match
//! results are discarded whenever the document list is reloaded; the
//! selection is independent of match state and survives reloads.

use std::collections::HashMap;

use rand::seq::SliceRandom;

use crate::screening::matching::{aggregate_score, KeywordCount};

#[derive(Debug, Default)]
pub struct Workspace {
    documents: Vec<String>,
    matches: HashMap<String, Vec<KeywordCount>>,
    case_sensitive: bool,
    selection: Vec<String>,
}

impl Workspace {
    /// Replaces the working set, keeping caller order. Match results describe
    /// the previous set and are dropped; the selection is kept.
    pub fn load_documents(&mut self, paths: Vec<String>) {
        self.documents = paths;
        self.matches.clear();
    }

    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    pub fn contains(&self, path: &str) -> bool {
        self.documents.iter().any(|d| d == path)
    }

    /// Shuffles the display order in place.
    pub fn shuffle(&mut self) {
        self.documents.shuffle(&mut rand::thread_rng());
    }

    /// Records the results of a filter run, replacing the previous run
    /// wholesale.
    pub fn record_matches(
        &mut self,
        results: HashMap<String, Vec<KeywordCount>>,
        case_sensitive: bool,
    ) {
        self.matches = results;
        self.case_sensitive = case_sensitive;
    }

    /// Case sensitivity of the recorded filter run, needed to reproduce its
    /// context snippets.
    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn matches_for(&self, path: &str) -> Option<&[KeywordCount]> {
        self.matches.get(path).map(|m| m.as_slice())
    }

    /// Aggregate score for a document, if it was part of the latest run.
    pub fn score_for(&self, path: &str) -> Option<usize> {
        self.matches.get(path).map(|m| aggregate_score(m))
    }

    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    /// Appends a document to the selection. Re-selecting an already selected
    /// document is a rejected no-op.
    pub fn select(&mut self, path: &str) -> bool {
        if self.selection.iter().any(|p| p == path) {
            return false;
        }
        self.selection.push(path.to_string());
        true
    }

    /// Removes a document from the selection; silent no-op when absent.
    pub fn deselect(&mut self, path: &str) -> bool {
        let before = self.selection.len();
        self.selection.retain(|p| p != path);
        self.selection.len() != before
    }

    /// Replaces the selection wholesale with exactly the documents whose
    /// aggregate score passes the threshold, in working-set order.
    pub fn auto_select(&mut self, threshold: usize) -> usize {
        let passing: Vec<String> = self
            .documents
            .iter()
            .filter(|d| self.score_for(d.as_str()).is_some_and(|s| s >= threshold))
            .cloned()
            .collect();
        self.selection = passing;
        self.selection.len()
    }
}
