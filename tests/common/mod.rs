//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use chipfield::config::FieldConfig;
use chipfield::delegate::TokenFieldDelegate;
use chipfield::layout::Rect;
use chipfield::theme::Color;
use chipfield::view::{Surface, TextStyle};
use chipfield::{Token, TokenField};

/// Delegate that records every hook call as "hook:title" and can veto
#[derive(Debug, Default)]
pub struct RecordingDelegate {
    pub events: Vec<String>,
    /// Frames reported through did_change_frame
    pub frames: Vec<Rect>,
    pub veto_add: bool,
    pub veto_delete: bool,
    pub veto_delete_all: bool,
    /// When set, change_appearance swaps in a token with this title
    pub substitute_title: Option<String>,
}

impl RecordingDelegate {
    pub fn take_events(&mut self) -> Vec<String> {
        std::mem::take(&mut self.events)
    }

    pub fn count(&self, event: &str) -> usize {
        self.events.iter().filter(|e| e.as_str() == event).count()
    }

    pub fn saw(&self, event: &str) -> bool {
        self.count(event) > 0
    }

    fn log(&mut self, event: impl Into<String>) {
        self.events.push(event.into());
    }
}

impl TokenFieldDelegate<String> for RecordingDelegate {
    fn display_title(&self, object: &String) -> String {
        object.clone()
    }

    fn display_detail(&self, object: &String) -> Option<String> {
        Some(format!("{}@example.com", object.to_lowercase()))
    }

    fn should_add(&mut self, token: &Token<String>) -> bool {
        self.log(format!("should_add:{}", token.title));
        !self.veto_add
    }

    fn will_add(&mut self, token: &mut Token<String>) {
        self.log(format!("will_add:{}", token.title));
    }

    fn change_appearance(&mut self, token: &Token<String>) -> Option<Token<String>> {
        let title = self.substitute_title.clone()?;
        let mut replacement = Token::new(title).with_appearance(token.appearance.clone());
        replacement.object = token.object.clone();
        Some(replacement)
    }

    fn did_add(&mut self, token: &Token<String>) {
        self.log(format!("did_add:{}", token.title));
    }

    fn did_fail_to_add(&mut self, token: &Token<String>) {
        self.log(format!("did_fail_to_add:{}", token.title));
    }

    fn should_delete(&mut self, token: &Token<String>) -> bool {
        self.log(format!("should_delete:{}", token.title));
        !self.veto_delete
    }

    fn will_delete(&mut self, token: &Token<String>) {
        self.log(format!("will_delete:{}", token.title));
    }

    fn did_delete(&mut self, token: &Token<String>) {
        self.log(format!("did_delete:{}", token.title));
    }

    fn did_fail_to_delete(&mut self, token: &Token<String>) {
        self.log(format!("did_fail_to_delete:{}", token.title));
    }

    fn should_delete_all(&mut self) -> bool {
        self.log("should_delete_all");
        !self.veto_delete_all
    }

    fn will_delete_all(&mut self) {
        self.log("will_delete_all");
    }

    fn did_delete_all(&mut self) {
        self.log("did_delete_all");
    }

    fn did_fail_to_delete_all(&mut self) {
        self.log("did_fail_to_delete_all");
    }

    fn did_begin_editing(&mut self) {
        self.log("did_begin_editing");
    }

    fn did_end_editing(&mut self) {
        self.log("did_end_editing");
    }

    fn did_select_token(&mut self, token: &Token<String>) {
        self.log(format!("did_select_token:{}", token.title));
    }

    fn did_change_frame(&mut self, frame: Rect) {
        self.frames.push(frame);
    }

    fn did_show_results(&mut self) {
        self.log("did_show_results");
    }

    fn did_hide_results(&mut self) {
        self.log("did_hide_results");
    }

    fn did_select_row(&mut self, index: usize) {
        self.log(format!("did_select_row:{}", index));
    }
}

pub type TestField = TokenField<String, RecordingDelegate>;

/// Defaults, but chips stay chips when focus is lost
pub fn plain_config() -> FieldConfig {
    FieldConfig {
        untokenize_on_end_editing: false,
        ..FieldConfig::default()
    }
}

/// A 300px wide field with the given config
pub fn test_field(config: FieldConfig) -> TestField {
    TokenField::new(config, RecordingDelegate::default()).with_area(Rect::new(0.0, 0.0, 300.0, 0.0))
}

/// A focused field holding tokens with the given titles, events cleared
pub fn field_with_tokens(config: FieldConfig, titles: &[&str]) -> TestField {
    let mut field = test_field(config);
    for title in titles {
        field.add_token_with_title(title).unwrap();
    }
    field.begin_editing();
    field.take_search_request();
    field.delegate_mut().take_events();
    field
}

pub fn titles(field: &TestField) -> Vec<String> {
    field.tokens().iter().map(|t| t.title.clone()).collect()
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rect(Rect, Color),
    RoundedRect(Rect, f32, Color),
    Text(Rect, String, TextStyle),
    Clip(Option<Rect>),
}

/// Surface that records draw calls instead of drawing
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text(_, text, _) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn rounded_rects(&self) -> Vec<(Rect, f32, Color)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::RoundedRect(rect, radius, color) => Some((*rect, *radius, *color)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::Rect(rect, color));
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        self.ops.push(DrawOp::RoundedRect(rect, radius, color));
    }

    fn draw_text(&mut self, rect: Rect, text: &str, style: TextStyle) {
        self.ops.push(DrawOp::Text(rect, text.to_string(), style));
    }

    fn set_clip(&mut self, rect: Option<Rect>) {
        self.ops.push(DrawOp::Clip(rect));
    }
}
