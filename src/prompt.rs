//! Prompt construction for the completion provider.
//!
//! One deterministic string per request: the Vietnamese instruction template
//! with every config field interpolated in fixed order, plus exactly one
//! clause of each boolean-driven pair (answers yes/no, LaTeX yes/no).

use crate::config::Prompts;
use crate::domain::ExerciseConfig;
use crate::util::fill_template;

/// Build the single free-text prompt sent to the provider.
/// Empty additional requirements render as the configured placeholder
/// ("Không có") rather than an empty bullet.
pub fn build_prompt(prompts: &Prompts, cfg: &ExerciseConfig) -> String {
  let requirements = if cfg.additional_requirements.trim().is_empty() {
    prompts.empty_requirements_placeholder.as_str()
  } else {
    cfg.additional_requirements.as_str()
  };

  let answers_clause = if cfg.include_answers {
    prompts.with_answers_clause.as_str()
  } else {
    prompts.without_answers_clause.as_str()
  };

  let latex_clause = if cfg.use_latex {
    prompts.with_latex_clause.as_str()
  } else {
    prompts.without_latex_clause.as_str()
  };

  fill_template(
    &prompts.generation_template,
    &[
      ("subject", cfg.subject.label()),
      ("grade", cfg.grade.label()),
      ("question_type", cfg.question_type.label()),
      ("quantity", &cfg.quantity),
      ("difficulty", cfg.difficulty.label()),
      ("topic", &cfg.topic),
      ("exercise_type", cfg.exercise_type.label()),
      ("tone", cfg.tone.label()),
      ("additional_requirements", requirements),
      ("answers_clause", answers_clause),
      ("latex_clause", latex_clause),
    ],
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::*;

  fn count(haystack: &str, needle: &str) -> usize {
    haystack.match_indices(needle).count()
  }

  #[test]
  fn fields_appear_exactly_once_in_fixed_order() {
    let prompts = Prompts::default();
    // Free-text values chosen so they cannot collide with template wording.
    let cfg = ExerciseConfig {
      quantity: "QTY-7-cau".into(),
      topic: "TOPIC-hinh-hoc".into(),
      additional_requirements: "REQ-them-hinh-ve".into(),
      ..ExerciseConfig::default()
    };
    let p = build_prompt(&prompts, &cfg);

    let expected = [
      cfg.subject.label(),
      cfg.grade.label(),
      cfg.question_type.label(),
      "QTY-7-cau",
      cfg.difficulty.label(),
      "TOPIC-hinh-hoc",
      cfg.exercise_type.label(),
      cfg.tone.label(),
      "REQ-them-hinh-ve",
    ];
    let mut last = 0usize;
    for value in expected {
      assert_eq!(count(&p, value), 1, "{value} should appear exactly once");
      let at = p.find(value).expect("value present");
      assert!(at >= last, "{value} out of order");
      last = at;
    }
    // No placeholder survives interpolation.
    for key in ["{subject}", "{grade}", "{topic}", "{answers_clause}", "{latex_clause}"] {
      assert!(!p.contains(key), "{key} left unfilled");
    }
  }

  #[test]
  fn directive_pairs_are_mutually_exclusive() {
    let prompts = Prompts::default();
    for include_answers in [false, true] {
      for use_latex in [false, true] {
        let cfg = ExerciseConfig { include_answers, use_latex, ..ExerciseConfig::default() };
        let p = build_prompt(&prompts, &cfg);

        assert_eq!(p.contains(&prompts.with_answers_clause), include_answers);
        assert_eq!(p.contains(&prompts.without_answers_clause), !include_answers);
        assert_eq!(p.contains(&prompts.with_latex_clause), use_latex);
        assert_eq!(p.contains(&prompts.without_latex_clause), !use_latex);
      }
    }
  }

  #[test]
  fn default_toan_lop3_scenario() {
    let prompts = Prompts::default();
    let cfg = ExerciseConfig::default();
    let p = build_prompt(&prompts, &cfg);

    assert!(p.contains("Toán"));
    assert!(p.contains("Lớp 3"));
    assert!(p.contains("3 câu"));
    assert!(p.contains(&prompts.with_answers_clause));
    assert!(p.contains(&prompts.with_latex_clause));
    // Empty additional requirements render as the placeholder.
    assert!(p.contains("Yêu cầu bổ sung: Không có"));
  }

  #[test]
  fn same_config_builds_the_same_prompt() {
    let prompts = Prompts::default();
    let cfg = ExerciseConfig { topic: "So sánh các số".into(), ..ExerciseConfig::default() };
    assert_eq!(build_prompt(&prompts, &cfg), build_prompt(&prompts, &cfg));
  }
}
