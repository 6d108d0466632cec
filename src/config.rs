//! Loading app configuration (prompt template + storage path) from TOML.
//!
//! See `AppConfig` and `Prompts` for the expected schema. Everything has a
//! built-in default; the TOML file only exists for tuning prompt wording
//! without a rebuild.

use std::path::PathBuf;

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  #[serde(default)]
  pub prompts: Prompts,
  /// Overrides the saved-questions file location (also settable via
  /// SOANDE_DATA_PATH, which wins over TOML).
  #[serde(default)]
  pub storage_path: Option<String>,
}

/// Prompt template and the clause pairs appended to it. The template is a
/// fixed Vietnamese instruction block; `{...}` placeholders are filled with
/// config values in fixed order, then exactly one clause of each pair is
/// substituted depending on the two boolean flags.
#[derive(Clone, Debug, Deserialize)]
pub struct Prompts {
  pub generation_template: String,
  pub with_answers_clause: String,
  pub without_answers_clause: String,
  pub with_latex_clause: String,
  pub without_latex_clause: String,
  /// Rendered for additional requirements when the field is empty.
  pub empty_requirements_placeholder: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      generation_template: "\
Bạn là một chuyên gia tạo tài liệu giáo dục cho học sinh tiểu học tại Việt Nam.
Hãy tạo một bộ câu hỏi dựa trên các tiêu chí sau đây. Phải trả lời bằng tiếng Việt.

- Môn học: {subject}
- Lớp: {grade}
- Loại câu hỏi: {question_type}
- Số lượng: {quantity}
- Mức độ: {difficulty}
- Chủ đề: {topic}
- Loại bài tập: {exercise_type}
- Phong cách: {tone}
- Yêu cầu bổ sung: {additional_requirements}

QUY TẮC ĐỊNH DẠNG:
- Bắt buộc trả về kết quả ở định dạng Markdown.
- {answers_clause}
- {latex_clause}

Bắt đầu tạo câu hỏi.
".into(),
      with_answers_clause:
        "Với mỗi câu hỏi, hãy cung cấp đáp án và lời giải chi tiết, dễ hiểu cho học sinh.".into(),
      without_answers_clause:
        "Chỉ cung cấp câu hỏi, không kèm đáp án hay lời giải.".into(),
      with_latex_clause:
        "Sử dụng LaTeX cho tất cả các công thức và biểu thức toán học. Ví dụ, với phép tính đặt theo cột dọc, hãy định dạng nó bằng môi trường \\begin{array}{r} ... \\end{array} của LaTeX. Bao quanh tất cả các biểu thức LaTeX bằng dấu đô la đơn ($) hoặc kép ($$).".into(),
      without_latex_clause: "Không sử dụng định dạng LaTeX.".into(),
      empty_requirements_placeholder: "Không có".into(),
    }
  }
}

/// Attempt to load `AppConfig` from SOANDE_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_app_config_from_env() -> Option<AppConfig> {
  let path = std::env::var("SOANDE_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<AppConfig>(&s) {
      Ok(cfg) => {
        info!(target: "soande_backend", %path, "Loaded app config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "soande_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "soande_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

/// Resolve the saved-questions file path: SOANDE_DATA_PATH, then TOML, then
/// the default next to the working directory.
pub fn resolve_storage_path(cfg: Option<&AppConfig>) -> PathBuf {
  if let Ok(p) = std::env::var("SOANDE_DATA_PATH") {
    return PathBuf::from(p);
  }
  if let Some(p) = cfg.and_then(|c| c.storage_path.clone()) {
    return PathBuf::from(p);
  }
  PathBuf::from("./data/saved_questions.json")
}
