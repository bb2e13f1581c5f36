use serde::Serialize;

/// Underlying question type counted by the distributor. Distinct from the
/// wire-level `QuestionType`: format tags are a user-facing selection, these
/// are the buckets the generation prompt is planned around.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice,
    MultipleSelect,
    TrueFalse,
}

impl QuestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice => "multiple_choice",
            QuestionKind::MultipleSelect => "multiple_select",
            QuestionKind::TrueFalse => "true_false",
        }
    }
}

/// Per-type question counts, in a fixed bucket order. The bucket values always
/// sum to the total passed to [`distribute`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDistribution {
    buckets: Vec<(QuestionKind, u32)>,
}

impl TypeDistribution {
    pub fn buckets(&self) -> &[(QuestionKind, u32)] {
        &self.buckets
    }

    pub fn total(&self) -> u32 {
        self.buckets.iter().map(|(_, count)| count).sum()
    }

    pub fn count_for(&self, kind: QuestionKind) -> u32 {
        self.buckets
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// Renders the distribution as a JSON object for the generation prompt,
    /// e.g. `{"multiple_choice": 5, "true_false": 5}`.
    pub fn to_prompt_json(&self) -> String {
        let mut map = serde_json::Map::new();
        for (kind, count) in &self.buckets {
            map.insert(kind.as_str().to_string(), serde_json::json!(count));
        }
        serde_json::to_string_pretty(&serde_json::Value::Object(map))
            .unwrap_or_else(|_| "{}".to_string())
    }
}

/// Computes how many questions of each underlying type to generate.
///
/// `mix-all` short-circuits to an even three-way split and ignores any other
/// selected tag. Otherwise the tag table is scanned in a fixed priority order
/// and duplicate underlying types collapse into a single bucket, so selecting
/// both `single-choice` and `scenario-based` yields one `multiple_choice`
/// bucket holding the full total. The division remainder is assigned one unit
/// at a time to the leading buckets, which conserves the total exactly and
/// keeps the result deterministic for identical inputs.
pub fn distribute(formats: &[String], total: u32) -> TypeDistribution {
    let has = |tag: &str| formats.iter().any(|f| f == tag);

    let kinds: Vec<QuestionKind> = if has("mix-all") {
        vec![
            QuestionKind::MultipleChoice,
            QuestionKind::MultipleSelect,
            QuestionKind::TrueFalse,
        ]
    } else {
        // Fixed priority order; scenario-based questions count as multiple choice.
        let table: [(&str, QuestionKind); 4] = [
            ("single-choice", QuestionKind::MultipleChoice),
            ("multiple-select", QuestionKind::MultipleSelect),
            ("true-false", QuestionKind::TrueFalse),
            ("scenario-based", QuestionKind::MultipleChoice),
        ];

        let mut selected = Vec::new();
        for (tag, kind) in table {
            if has(tag) && !selected.contains(&kind) {
                selected.push(kind);
            }
        }

        if selected.is_empty() {
            selected.push(QuestionKind::MultipleChoice);
        }
        selected
    };

    let k = kinds.len() as u32;
    let base = total / k;
    let rem = total % k;

    let buckets = kinds
        .into_iter()
        .enumerate()
        .map(|(i, kind)| (kind, base + u32::from((i as u32) < rem)))
        .collect();

    TypeDistribution { buckets }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_distribution_conserves_total() {
        let selections = [
            tags(&["single-choice"]),
            tags(&["single-choice", "true-false"]),
            tags(&["single-choice", "multiple-select", "true-false"]),
            tags(&["mix-all"]),
            tags(&["scenario-based", "multiple-select"]),
            tags(&[]),
        ];

        for formats in &selections {
            for total in [1, 2, 3, 7, 10, 99, 250] {
                let distribution = distribute(formats, total);
                assert_eq!(
                    distribution.total(),
                    total,
                    "total not conserved for {:?} / {}",
                    formats,
                    total
                );
            }
        }
    }

    #[test]
    fn test_distribution_is_deterministic() {
        let formats = tags(&["mix-all", "true-false"]);
        assert_eq!(distribute(&formats, 17), distribute(&formats, 17));
    }

    #[test]
    fn test_mix_all_overrides_other_tags() {
        let distribution = distribute(&tags(&["mix-all", "single-choice"]), 10);

        assert_eq!(
            distribution.buckets(),
            &[
                (QuestionKind::MultipleChoice, 4),
                (QuestionKind::MultipleSelect, 3),
                (QuestionKind::TrueFalse, 3),
            ]
        );
    }

    #[test]
    fn test_duplicate_types_collapse_into_one_bucket() {
        // single-choice and scenario-based both map to multiple_choice;
        // the whole total must land in one bucket, not split across two.
        let distribution = distribute(&tags(&["single-choice", "scenario-based"]), 9);

        assert_eq!(
            distribution.buckets(),
            &[(QuestionKind::MultipleChoice, 9)]
        );
    }

    #[test]
    fn test_no_recognized_tags_defaults_to_multiple_choice() {
        let distribution = distribute(&tags(&["essay", "flashcards"]), 5);

        assert_eq!(
            distribution.buckets(),
            &[(QuestionKind::MultipleChoice, 5)]
        );
    }

    #[test]
    fn test_remainder_goes_to_leading_buckets() {
        let distribution = distribute(&tags(&["single-choice", "true-false"]), 9);

        assert_eq!(distribution.count_for(QuestionKind::MultipleChoice), 5);
        assert_eq!(distribution.count_for(QuestionKind::TrueFalse), 4);
    }

    #[test]
    fn test_zero_total_yields_all_zero_buckets() {
        let distribution = distribute(&tags(&["mix-all"]), 0);

        assert_eq!(distribution.total(), 0);
        assert!(distribution.buckets().iter().all(|(_, count)| *count == 0));
    }

    #[test]
    fn test_prompt_json_contains_every_bucket() {
        let distribution = distribute(&tags(&["single-choice", "true-false"]), 10);
        let json = distribution.to_prompt_json();

        assert!(json.contains("\"multiple_choice\": 5"));
        assert!(json.contains("\"true_false\": 5"));
    }
}
