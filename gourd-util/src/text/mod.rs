use std::borrow::Cow;

/// A chat or system message, possibly with further components appended.
#[derive(Clone, Debug, PartialEq)]
pub struct TextComponent {
    pub content: TextContent,
    /// Components rendered after this one.
    pub extra: Vec<TextComponent>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TextContent {
    /// Raw text.
    Text { text: Cow<'static, str> },
    /// A key into the client's translation tables plus its fill-in arguments.
    Translate {
        translate: Cow<'static, str>,
        with: Vec<TextComponent>,
    },
}

impl TextComponent {
    pub fn text(text: impl Into<Cow<'static, str>>) -> Self {
        Self {
            content: TextContent::Text { text: text.into() },
            extra: Vec::new(),
        }
    }

    pub fn translate(key: impl Into<Cow<'static, str>>, with: impl Into<Vec<TextComponent>>) -> Self {
        Self {
            content: TextContent::Translate {
                translate: key.into(),
                with: with.into(),
            },
            extra: Vec::new(),
        }
    }

    #[must_use]
    pub fn add_child(mut self, child: TextComponent) -> Self {
        self.extra.push(child);
        self
    }

    /// Flattens the component to plain text. Translation keys are rendered
    /// as-is since the server keeps no language tables.
    #[must_use]
    pub fn get_text(&self) -> String {
        let mut text = match &self.content {
            TextContent::Text { text } => text.to_string(),
            TextContent::Translate { translate, .. } => translate.to_string(),
        };
        for child in &self.extra {
            text.push_str(&child.get_text());
        }
        text
    }
}
