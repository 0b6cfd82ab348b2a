use pulldown_cmark::{Event as MdEvent, Options as MdOptions, Parser as MdParser, Tag, TagEnd};

use crate::{InlineStyle, LineKind, OutlineEntry, RenderedDocument, RenderedLine, Span};

#[derive(Clone, Copy)]
enum ListKind {
    Bullet,
    Ordered(u64),
}

/// Render markdown source into display lines and an outline.
pub fn render(source: &str) -> RenderedDocument {
    let mut options = MdOptions::empty();
    options.insert(MdOptions::ENABLE_STRIKETHROUGH);
    options.insert(MdOptions::ENABLE_TABLES);
    options.insert(MdOptions::ENABLE_TASKLISTS);

    let mut renderer = Renderer::default();
    for event in MdParser::new_ext(source, options) {
        renderer.handle(event);
    }
    renderer.finish()
}

#[derive(Default)]
struct Renderer {
    lines: Vec<RenderedLine>,
    outline: Vec<OutlineEntry>,
    spans: Vec<Span>,
    heading: Option<u8>,
    in_item: bool,
    quote_depth: usize,
    list_stack: Vec<ListKind>,
    in_code_block: bool,
    strong: usize,
    emphasis: usize,
    link: usize,
}

impl Renderer {
    fn handle(&mut self, event: MdEvent<'_>) {
        if self.in_code_block {
            match event {
                MdEvent::End(TagEnd::CodeBlock) => {
                    self.in_code_block = false;
                    self.push_blank();
                }
                MdEvent::Text(text) => {
                    for code_line in text.lines() {
                        self.push_line(LineKind::Code, vec![plain_span(code_line)]);
                    }
                }
                _ => {}
            }
            return;
        }

        match event {
            MdEvent::Start(tag) => self.start(tag),
            MdEvent::End(tag_end) => self.end(tag_end),
            MdEvent::Text(text) => self.push_span(&text, false),
            MdEvent::Code(text) => self.push_span(&text, true),
            MdEvent::SoftBreak => self.push_span(" ", false),
            MdEvent::HardBreak => self.flush(),
            MdEvent::Rule => {
                self.flush();
                self.push_line(LineKind::Rule, Vec::new());
                self.push_blank();
            }
            MdEvent::TaskListMarker(checked) => {
                self.push_span(if checked { "[x] " } else { "[ ] " }, false)
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.flush();
                self.heading = Some(level as u8);
            }
            Tag::BlockQuote { .. } => {
                self.flush();
                self.quote_depth += 1;
            }
            Tag::List(start) => {
                self.flush();
                self.list_stack.push(match start {
                    Some(n) => ListKind::Ordered(n),
                    None => ListKind::Bullet,
                });
            }
            Tag::Item => {
                self.flush();
                self.in_item = true;
                let indent = "  ".repeat(self.list_stack.len().saturating_sub(1));
                let marker = match self.list_stack.last_mut() {
                    Some(ListKind::Ordered(n)) => {
                        let marker = format!("{}{}. ", indent, n);
                        *n += 1;
                        marker
                    }
                    _ => format!("{}• ", indent),
                };
                self.spans.push(plain_span(&marker));
            }
            Tag::CodeBlock { .. } => {
                self.flush();
                self.in_code_block = true;
            }
            Tag::Strong => self.strong += 1,
            Tag::Emphasis => self.emphasis += 1,
            Tag::Link { .. } => self.link += 1,
            _ => {}
        }
    }

    fn end(&mut self, tag_end: TagEnd) {
        match tag_end {
            TagEnd::Paragraph => {
                self.flush();
                if !self.in_item {
                    self.push_blank();
                }
            }
            TagEnd::Heading { .. } => {
                if let Some(level) = self.heading {
                    let title = self.spans.iter().map(|s| s.text.as_str()).collect();
                    self.outline.push(OutlineEntry {
                        level,
                        title,
                        line: self.lines.len(),
                    });
                }
                self.flush();
                self.heading = None;
                self.push_blank();
            }
            TagEnd::BlockQuote { .. } => {
                self.flush();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.push_blank();
            }
            TagEnd::List { .. } => {
                self.flush();
                self.list_stack.pop();
                if self.list_stack.is_empty() {
                    self.push_blank();
                }
            }
            TagEnd::Item => {
                self.flush();
                self.in_item = false;
            }
            TagEnd::Strong => self.strong = self.strong.saturating_sub(1),
            TagEnd::Emphasis => self.emphasis = self.emphasis.saturating_sub(1),
            TagEnd::Link => self.link = self.link.saturating_sub(1),
            _ => {}
        }
    }

    fn push_span(&mut self, text: &str, code: bool) {
        let style = InlineStyle {
            strong: self.strong > 0,
            emphasis: self.emphasis > 0,
            code,
            link: self.link > 0,
        };
        match self.spans.last_mut() {
            Some(last) if last.style == style => last.text.push_str(text),
            _ => self.spans.push(Span {
                text: text.to_string(),
                style,
            }),
        }
    }

    /// Close the line being built, if it has any content.
    fn flush(&mut self) {
        if self.spans.is_empty() {
            return;
        }
        let kind = match self.heading {
            Some(level) => LineKind::Heading(level),
            None if self.in_item => LineKind::ListItem,
            None => LineKind::Paragraph,
        };
        let spans = std::mem::take(&mut self.spans);
        self.push_line(kind, spans);
    }

    fn push_line(&mut self, kind: LineKind, spans: Vec<Span>) {
        self.lines.push(RenderedLine {
            kind,
            quote_depth: self.quote_depth,
            spans,
        });
    }

    /// Separate blocks by a single blank line.
    fn push_blank(&mut self) {
        if self
            .lines
            .last()
            .is_some_and(|line| line.kind != LineKind::Blank)
        {
            self.lines.push(RenderedLine::blank());
        }
    }

    fn finish(mut self) -> RenderedDocument {
        self.flush();
        while self
            .lines
            .last()
            .is_some_and(|line| line.kind == LineKind::Blank)
        {
            self.lines.pop();
        }
        RenderedDocument {
            lines: self.lines,
            outline: self.outline,
        }
    }
}

fn plain_span(text: &str) -> Span {
    Span {
        text: text.to_string(),
        style: InlineStyle::default(),
    }
}
