//! Prompt construction for citation-grounded answering.

use crate::types::RetrievedSection;

/// Builds the completion prompt from a query and its retrieved sections.
///
/// Sources are numbered from 1 in retrieval order; the model is told to cite
/// with bracketed numbers so the segmenter can resolve them afterwards. Pure
/// string assembly, no IO.
pub fn citation_prompt(query: &str, retrieved: &[RetrievedSection]) -> String {
    let mut prompt = String::from(
        "Answer the question using only the numbered sources below. \
         Cite every claim with the matching source number in square brackets, \
         like [2]. If the sources do not contain the answer, say so.\n\n",
    );
    for (index, hit) in retrieved.iter().enumerate() {
        prompt.push_str(&format!("Source {}: {}\n\n", index + 1, hit.text));
    }
    prompt.push_str(&format!("Question: {query}\nAnswer:"));
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(text: &str) -> RetrievedSection {
        RetrievedSection {
            section_id: Some("1".to_string()),
            page: Some(1),
            text: text.to_string(),
            score: None,
        }
    }

    #[test]
    fn sources_are_numbered_from_one_in_order() {
        let prompt = citation_prompt("what is theft?", &[hit("Theft is taking."), hit("Oaths bind.")]);
        assert!(prompt.contains("Source 1: Theft is taking."));
        assert!(prompt.contains("Source 2: Oaths bind."));
        let first = prompt.find("Source 1:").unwrap();
        let second = prompt.find("Source 2:").unwrap();
        assert!(first < second);
    }

    #[test]
    fn query_lands_at_the_end() {
        let prompt = citation_prompt("who judges?", &[hit("The council judges.")]);
        assert!(prompt.ends_with("Question: who judges?\nAnswer:"));
    }

    #[test]
    fn no_sources_still_yields_a_usable_prompt() {
        let prompt = citation_prompt("anything?", &[]);
        assert!(!prompt.contains("Source 1:"));
        assert!(prompt.contains("Question: anything?"));
    }
}
