//! Small utility helpers used across modules.

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
/// This is intentionally simple (no nested/conditional logic).
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = tpl.to_string();
  for (k, v) in pairs {
    let needle = format!("{{{}}}", k);
    out = out.replace(&needle, v);
  }
  out
}

/// One-line preview for the saved-questions list: collapse whitespace, cut at
/// a word boundary when one falls in the last 40% of the window, add "...".
pub fn truncate_preview(text: &str, max: usize) -> String {
  let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
  if single_line.chars().count() <= max {
    return single_line;
  }
  let cut: String = single_line.chars().take(max).collect();
  // Threshold in bytes, matching the byte index rfind returns.
  let threshold: usize = cut.chars().take(max * 6 / 10).map(char::len_utf8).sum();
  let trimmed = match cut.rfind(' ') {
    Some(at) if at > threshold => &cut[..at],
    _ => cut.as_str(),
  };
  format!("{}...", trimmed.trim_end())
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request/response payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.chars().count() <= max {
    s.to_string()
  } else {
    let cut: String = s.chars().take(max).collect();
    format!("{}… ({} bytes total)", cut, s.len())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fill_template_replaces_every_occurrence() {
    let out = fill_template("A {x} B {y} C {x}", &[("x", "1"), ("y", "2")]);
    assert_eq!(out, "A 1 B 2 C 1");
  }

  #[test]
  fn preview_collapses_whitespace_and_cuts_at_word_boundary() {
    assert_eq!(truncate_preview("ngắn  thôi", 120), "ngắn thôi");
    let long = "Câu 1: Tính 12 + 34. Câu 2: Tính 56 + 78. Câu 3: So sánh 90 và 89.";
    let p = truncate_preview(long, 30);
    assert!(p.ends_with("..."));
    assert!(!p.contains('\n'));
    assert!(p.chars().count() <= 34);
  }

  #[test]
  fn preview_word_boundary_counts_chars_not_bytes() {
    // Space sits at 50% of the chars; with three-byte letters its byte index
    // would clear a byte-based 60% threshold and trim too eagerly.
    let p = truncate_preview("ồồồồồ ồồồồồồồ", 10);
    assert_eq!(p, "ồồồồồ ồồồồ...");
  }

  #[test]
  fn trunc_for_log_respects_multibyte_boundaries() {
    let s = "Câu hỏi về phép cộng";
    let t = trunc_for_log(s, 7);
    assert!(t.starts_with("Câu hỏi"));
    assert!(t.contains("bytes total"));
  }
}
