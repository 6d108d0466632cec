//! Domain models: exercise configuration, saved questions, and the generation session.
//!
//! Category fields are closed enums whose serde names are the exact Vietnamese
//! labels the SPA form sends. Labels double as the values interpolated into
//! the prompt, so `label()` and the serde rename must stay in sync.

use serde::{Deserialize, Serialize};

/// Môn học (school subject).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Subject {
  #[serde(rename = "Toán")]
  Toan,
  #[serde(rename = "Tiếng Việt")]
  TiengViet,
  #[serde(rename = "Khoa học")]
  KhoaHoc,
  #[serde(rename = "Lịch sử và Địa lý")]
  LichSuDiaLy,
  #[serde(rename = "Đạo đức")]
  DaoDuc,
  #[serde(rename = "Âm nhạc")]
  AmNhac,
  #[serde(rename = "Mỹ thuật")]
  MyThuat,
}

impl Subject {
  pub fn label(&self) -> &'static str {
    match self {
      Subject::Toan => "Toán",
      Subject::TiengViet => "Tiếng Việt",
      Subject::KhoaHoc => "Khoa học",
      Subject::LichSuDiaLy => "Lịch sử và Địa lý",
      Subject::DaoDuc => "Đạo đức",
      Subject::AmNhac => "Âm nhạc",
      Subject::MyThuat => "Mỹ thuật",
    }
  }
}

impl Default for Subject {
  fn default() -> Self { Subject::Toan }
}

/// Lớp (grade level, primary school only).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
  #[serde(rename = "Lớp 1")]
  Lop1,
  #[serde(rename = "Lớp 2")]
  Lop2,
  #[serde(rename = "Lớp 3")]
  Lop3,
  #[serde(rename = "Lớp 4")]
  Lop4,
  #[serde(rename = "Lớp 5")]
  Lop5,
}

impl Grade {
  pub fn label(&self) -> &'static str {
    match self {
      Grade::Lop1 => "Lớp 1",
      Grade::Lop2 => "Lớp 2",
      Grade::Lop3 => "Lớp 3",
      Grade::Lop4 => "Lớp 4",
      Grade::Lop5 => "Lớp 5",
    }
  }
}

impl Default for Grade {
  fn default() -> Self { Grade::Lop3 }
}

/// Loại câu hỏi (question format).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionType {
  #[serde(rename = "Trắc nghiệm")]
  TracNghiem,
  #[serde(rename = "Tự luận")]
  TuLuan,
  #[serde(rename = "Điền vào chỗ trống")]
  DienVaoChoTrong,
  #[serde(rename = "Đúng/Sai")]
  DungSai,
  #[serde(rename = "Nối cặp")]
  NoiCap,
}

impl QuestionType {
  pub fn label(&self) -> &'static str {
    match self {
      QuestionType::TracNghiem => "Trắc nghiệm",
      QuestionType::TuLuan => "Tự luận",
      QuestionType::DienVaoChoTrong => "Điền vào chỗ trống",
      QuestionType::DungSai => "Đúng/Sai",
      QuestionType::NoiCap => "Nối cặp",
    }
  }
}

impl Default for QuestionType {
  fn default() -> Self { QuestionType::TracNghiem }
}

/// Mức độ (cognitive difficulty).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
  #[serde(rename = "Nhận biết")]
  NhanBiet,
  #[serde(rename = "Thông hiểu")]
  ThongHieu,
  #[serde(rename = "Nâng cao")]
  NangCao,
}

impl Difficulty {
  pub fn label(&self) -> &'static str {
    match self {
      Difficulty::NhanBiet => "Nhận biết",
      Difficulty::ThongHieu => "Thông hiểu",
      Difficulty::NangCao => "Nâng cao",
    }
  }
}

impl Default for Difficulty {
  fn default() -> Self { Difficulty::ThongHieu }
}

/// Loại bài tập (exercise context).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExerciseType {
  #[serde(rename = "Bài tập hàng ngày")]
  BaiTapHangNgay,
  #[serde(rename = "Bài ôn tập")]
  BaiOnTap,
  #[serde(rename = "Kiểm tra nhanh")]
  KiemTraNhanh,
  #[serde(rename = "Đề thi cuối kỳ")]
  DeThiCuoiKy,
}

impl ExerciseType {
  pub fn label(&self) -> &'static str {
    match self {
      ExerciseType::BaiTapHangNgay => "Bài tập hàng ngày",
      ExerciseType::BaiOnTap => "Bài ôn tập",
      ExerciseType::KiemTraNhanh => "Kiểm tra nhanh",
      ExerciseType::DeThiCuoiKy => "Đề thi cuối kỳ",
    }
  }
}

impl Default for ExerciseType {
  fn default() -> Self { ExerciseType::BaiTapHangNgay }
}

/// Phong cách (tone of the generated text).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
  #[serde(rename = "Thân thiện, vui vẻ")]
  ThanThienVuiVe,
  #[serde(rename = "Học thuật, nghiêm túc")]
  HocThuatNghiemTuc,
}

impl Tone {
  pub fn label(&self) -> &'static str {
    match self {
      Tone::ThanThienVuiVe => "Thân thiện, vui vẻ",
      Tone::HocThuatNghiemTuc => "Học thuật, nghiêm túc",
    }
  }
}

impl Default for Tone {
  fn default() -> Self { Tone::ThanThienVuiVe }
}

/// One validated generation request, immutable per request.
/// Every field has a serde default so the SPA can omit anything and still
/// get the form's initial state.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExerciseConfig {
  pub subject: Subject,
  pub grade: Grade,
  pub question_type: QuestionType,
  pub quantity: String,
  pub difficulty: Difficulty,
  pub topic: String,
  pub exercise_type: ExerciseType,
  pub tone: Tone,
  pub include_answers: bool,
  pub use_latex: bool,
  pub additional_requirements: String,
}

impl Default for ExerciseConfig {
  fn default() -> Self {
    Self {
      subject: Subject::default(),
      grade: Grade::default(),
      question_type: QuestionType::default(),
      quantity: "3 câu".into(),
      difficulty: Difficulty::default(),
      topic: "Phép cộng đặt tính".into(),
      exercise_type: ExerciseType::default(),
      tone: Tone::default(),
      include_answers: true,
      use_latex: true,
      additional_requirements: String::new(),
    }
  }
}

/// One persisted generation result. `id` and `content` are immutable once
/// created; the store only ever creates and deletes entries.
/// Field names are the on-disk layout: {id, content, timestamp, title}.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedQuestion {
  pub id: i64,
  pub content: String,
  /// ISO-8601, UTC.
  pub timestamp: String,
  /// Cosmetic label ("Câu hỏi N"), not a uniqueness key.
  pub title: String,
}

/// Lifecycle of one generation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
  Idle,
  Pending,
  Succeeded,
  Failed,
}

/// Ephemeral per-request session. Superseded whole by the next request.
///
/// `seq` tags the request a pending session belongs to: a response is only
/// applied if its sequence still matches, so when requests overlap the stale
/// one is discarded instead of racing for the last write.
#[derive(Clone, Debug)]
pub struct GenerationSession {
  pub status: GenerationStatus,
  pub content: String,
  pub error: Option<String>,
  pub seq: u64,
}

impl GenerationSession {
  pub fn new() -> Self {
    Self { status: GenerationStatus::Idle, content: String::new(), error: None, seq: 0 }
  }

  /// Start request `seq`: Pending, prior content and error cleared.
  pub fn begin(&mut self, seq: u64) {
    self.status = GenerationStatus::Pending;
    self.content.clear();
    self.error = None;
    self.seq = seq;
  }

  /// Apply a successful response for request `seq`.
  /// Returns false (and changes nothing) if a newer request has started.
  pub fn finish_ok(&mut self, seq: u64, content: String) -> bool {
    if seq != self.seq {
      return false;
    }
    self.status = GenerationStatus::Succeeded;
    self.content = content;
    self.error = None;
    true
  }

  /// Apply a failure for request `seq`. Same staleness rule as `finish_ok`.
  pub fn finish_err(&mut self, seq: u64, message: String) -> bool {
    if seq != self.seq {
      return false;
    }
    self.status = GenerationStatus::Failed;
    self.content.clear();
    self.error = Some(message);
    true
  }

  /// Mirror recalled content into the display surface.
  pub fn replace_content(&mut self, content: String) {
    self.status = GenerationStatus::Succeeded;
    self.content = content;
    self.error = None;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn pending_failure_moves_straight_to_failed() {
    let mut s = GenerationSession::new();
    s.begin(1);
    assert_eq!(s.status, GenerationStatus::Pending);
    assert!(s.content.is_empty());
    assert!(s.error.is_none());

    assert!(s.finish_err(1, "Không thể tạo câu hỏi.".into()));
    assert_eq!(s.status, GenerationStatus::Failed);
    assert!(s.content.is_empty());
    assert!(!s.error.as_deref().unwrap_or_default().is_empty());
  }

  #[test]
  fn new_request_clears_previous_result() {
    let mut s = GenerationSession::new();
    s.begin(1);
    assert!(s.finish_ok(1, "Câu 1: 2 + 2 = ?".into()));
    s.begin(2);
    assert_eq!(s.status, GenerationStatus::Pending);
    assert!(s.content.is_empty());
  }

  #[test]
  fn stale_response_is_discarded() {
    let mut s = GenerationSession::new();
    s.begin(1);
    s.begin(2);
    // Response for request 1 arrives after request 2 started.
    assert!(!s.finish_ok(1, "stale".into()));
    assert_eq!(s.status, GenerationStatus::Pending);
    assert!(s.content.is_empty());

    assert!(s.finish_ok(2, "fresh".into()));
    assert_eq!(s.status, GenerationStatus::Succeeded);
    assert_eq!(s.content, "fresh");

    // Same for a stale failure.
    assert!(!s.finish_err(1, "stale error".into()));
    assert_eq!(s.status, GenerationStatus::Succeeded);
  }

  #[test]
  fn config_defaults_match_the_form_initial_state() {
    let c = ExerciseConfig::default();
    assert_eq!(c.subject.label(), "Toán");
    assert_eq!(c.grade.label(), "Lớp 3");
    assert_eq!(c.question_type.label(), "Trắc nghiệm");
    assert_eq!(c.quantity, "3 câu");
    assert_eq!(c.difficulty.label(), "Thông hiểu");
    assert!(c.include_answers && c.use_latex);
    assert!(c.additional_requirements.is_empty());
  }

  #[test]
  fn config_deserializes_vietnamese_labels_and_fills_defaults() {
    let c: ExerciseConfig = serde_json::from_str(
      r#"{"subject":"Tiếng Việt","grade":"Lớp 2","questionType":"Tự luận","includeAnswers":false}"#,
    )
    .expect("config");
    assert_eq!(c.subject, Subject::TiengViet);
    assert_eq!(c.grade, Grade::Lop2);
    assert_eq!(c.question_type, QuestionType::TuLuan);
    assert!(!c.include_answers);
    // Omitted fields fall back to defaults.
    assert_eq!(c.tone, Tone::ThanThienVuiVe);
    assert_eq!(c.quantity, "3 câu");
  }
}
