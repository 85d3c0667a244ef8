use crate::model::Profile;

/// Scores documents against a free-text query.
///
/// The store ranks every document with [`TextIndex::score`] and returns the
/// highest scoring one, so an implementation only decides *whether* and *how
/// well* a single profile matches.
pub trait TextIndex: Send + Sync {
    /// Returns `None` when `profile` does not match `query`.
    fn score(&self, profile: &Profile, query: &str) -> Option<usize>;
}

/// Keyword matching over the indexed fields listed in [`indexed_text`].
///
/// Query syntax: bare terms are OR-ed, `"quoted phrases"` must all appear,
/// and `-term` rejects any document containing `term`. Matching is
/// case-insensitive and words are split on non-alphanumeric characters.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordIndex;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub terms: Vec<String>,
    pub phrases: Vec<String>,
    pub excluded: Vec<String>,
}

impl SearchQuery {
    pub fn parse(query: &str) -> Self {
        let mut parsed = SearchQuery::default();
        let mut rest = query;

        while let Some(start) = rest.find('"') {
            parsed.push_words(&rest[..start]);
            let after = &rest[start + 1..];
            match after.find('"') {
                Some(end) => {
                    let phrase = after[..end].trim().to_lowercase();
                    if !phrase.is_empty() {
                        parsed.phrases.push(phrase);
                    }
                    rest = &after[end + 1..];
                }
                // Unbalanced quote: treat the remainder as plain terms.
                None => {
                    rest = after;
                    break;
                }
            }
        }
        parsed.push_words(rest);
        parsed
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty() && self.phrases.is_empty()
    }

    fn push_words(&mut self, text: &str) {
        for word in text.split_whitespace() {
            match word.strip_prefix('-') {
                Some(negated) if !negated.is_empty() => self.excluded.extend(tokenize(negated)),
                _ => self.terms.extend(tokenize(word)),
            }
        }
    }
}

/// Lower-cased alphanumeric runs of `text`.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

/// The raw text of every indexed field of `profile`: `name`,
/// `education.institution`, `education.degree`, `skills`, `projects.title`,
/// `projects.description`, `work.company` and `work.position`.
pub fn indexed_text(profile: &Profile) -> Vec<&str> {
    let mut fields = vec![profile.name.as_str()];
    for edu in &profile.education {
        fields.extend(edu.institution.as_deref());
        fields.extend(edu.degree.as_deref());
    }
    fields.extend(profile.skills.iter().map(String::as_str));
    for project in &profile.projects {
        fields.extend(project.title.as_deref());
        fields.extend(project.description.as_deref());
    }
    for job in &profile.work {
        fields.extend(job.company.as_deref());
        fields.extend(job.position.as_deref());
    }
    fields
}

impl TextIndex for KeywordIndex {
    fn score(&self, profile: &Profile, query: &str) -> Option<usize> {
        let query = SearchQuery::parse(query);
        if query.is_empty() {
            return None;
        }

        let fields: Vec<String> = indexed_text(profile).into_iter().map(str::to_lowercase).collect();
        let words: Vec<String> = fields.iter().flat_map(|f| tokenize(f)).collect();

        if query.excluded.iter().any(|ex| words.contains(ex)) {
            return None;
        }

        let mut score = 0;
        for phrase in &query.phrases {
            let hits: usize = fields.iter().map(|f| f.matches(phrase.as_str()).count()).sum();
            if hits == 0 {
                return None;
            }
            score += hits;
        }

        let term_hits = words.iter().filter(|w| query.terms.contains(w)).count();
        if query.phrases.is_empty() && term_hits == 0 {
            return None;
        }

        Some(score + term_hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Education, ProfileInput, Project, Work};
    use chrono::Utc;
    use uuid::Uuid;

    fn profile() -> Profile {
        let now = Utc::now();
        ProfileInput {
            name: Some("Grace Hopper".into()),
            email: Some("grace@example.com".into()),
            education: vec![Education {
                institution: Some("Yale University".into()),
                degree: Some("PhD Mathematics".into()),
                year: Some("1934".into()),
            }],
            skills: vec!["COBOL".into(), "Node.js".into()],
            projects: vec![Project {
                title: Some("Compiler".into()),
                description: Some("First compiler for a business language".into()),
                links: vec![],
            }],
            work: vec![Work {
                company: Some("US Navy".into()),
                position: Some("Rear Admiral".into()),
                duration: Some("1943 - 1986".into()),
                description: Some("Debugged a moth out of the Mark II".into()),
            }],
            links: None,
        }
        .into_profile(Uuid::new_v4(), now, now)
        .unwrap()
    }

    #[test]
    fn test_parse_query() {
        let q = SearchQuery::parse(r#"rust "business language" -java Node.js"#);
        assert_eq!(q.terms, vec!["rust", "node", "js"]);
        assert_eq!(q.phrases, vec!["business language"]);
        assert_eq!(q.excluded, vec!["java"]);
    }

    #[test]
    fn test_terms_match_any_indexed_field() {
        let p = profile();
        assert!(KeywordIndex.score(&p, "business").is_some());
        assert!(KeywordIndex.score(&p, "YALE").is_some());
        assert!(KeywordIndex.score(&p, "admiral").is_some());
        assert!(KeywordIndex.score(&p, "cobol fortran").is_some());
        assert!(KeywordIndex.score(&p, "fortran").is_none());
    }

    #[test]
    fn test_unindexed_fields_do_not_match() {
        let p = profile();
        assert!(KeywordIndex.score(&p, "moth").is_none());
        assert!(KeywordIndex.score(&p, "1934").is_none());
    }

    #[test]
    fn test_phrases_and_negation() {
        let p = profile();
        assert!(KeywordIndex.score(&p, "\"first compiler\"").is_some());
        assert!(KeywordIndex.score(&p, "\"compiler first\"").is_none());
        assert!(KeywordIndex.score(&p, "compiler -navy").is_none());
        assert!(KeywordIndex.score(&p, "-fortran").is_none());
        assert!(KeywordIndex.score(&p, "   ").is_none());
    }

    #[test]
    fn test_indexed_text_covers_declared_fields() {
        let p = profile();
        assert_eq!(
            indexed_text(&p),
            vec![
                "Grace Hopper",
                "Yale University",
                "PhD Mathematics",
                "COBOL",
                "Node.js",
                "Compiler",
                "First compiler for a business language",
                "US Navy",
                "Rear Admiral",
            ]
        );
    }

    #[test]
    fn test_score_counts_occurrences() {
        let p = profile();
        assert_eq!(KeywordIndex.score(&p, "compiler"), Some(2));
        assert_eq!(KeywordIndex.score(&p, "compiler grace"), Some(3));
    }
}
