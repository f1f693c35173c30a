use crate::parser::token::TokenKind;
use crossterm::style::Color;

pub struct Theme {
    pub prompt: Color,
    pub keyword: Color,
    pub number: Color,
    pub identifier: Color,
    pub operator: Color,
    pub delimiter: Color,
    pub illegal: Color,
    pub comment: Color, // EOF marker
    pub error: Color,   // Diagnostics
    pub success: Color, // Canonical AST output
}

pub const DEFAULT_THEME: Theme = Theme {
    prompt: Color::Rgb { r: 249, g: 226, b: 175 },     // Yellow
    keyword: Color::Rgb { r: 137, g: 180, b: 250 },    // Blue
    number: Color::Rgb { r: 250, g: 179, b: 135 },     // Orange
    identifier: Color::Rgb { r: 205, g: 214, b: 244 }, // Foreground
    operator: Color::Rgb { r: 148, g: 226, b: 213 },   // Cyan
    delimiter: Color::Rgb { r: 180, g: 165, b: 120 },  // Muted yellow
    illegal: Color::Rgb { r: 243, g: 139, b: 168 },    // Red
    comment: Color::Rgb { r: 108, g: 112, b: 134 },
    error: Color::Rgb { r: 243, g: 139, b: 168 },
    success: Color::Rgb { r: 166, g: 227, b: 161 },
};

impl Theme {
    pub fn token_color(&self, kind: TokenKind) -> Color {
        match kind {
            TokenKind::Int => self.number,
            TokenKind::Identifier => self.identifier,
            TokenKind::Illegal => self.illegal,
            TokenKind::Eof => self.comment,
            kind if kind.is_keyword() => self.keyword,
            kind if kind.is_operator() => self.operator,
            _ => self.delimiter,
        }
    }
}
