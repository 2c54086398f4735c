//! Format statements.
//!
//! A statement is literal text with replacement fields in braces. A field
//! names an argument by index, and may constrain its width:
//!
//! ```text
//! {index[,min[,max[,align]]]}
//! ```
//!
//! `min` pads the argument with spaces to at least that many characters, and
//! `max` truncates it to at most that many. `align` is one of `<` (the
//! default), `>`, or `^`, and says which side the padding goes on. Any of the
//! optional fields may be left empty, as in `{0,,5}`.
//!
//! `min` may be at most [`MAX_WIDTH`]. `{{` is a literal `{`. A `}` outside
//! of a field is literal as-is.

use std::ops::Range;

use annotate_snippets::Annotation;
use annotate_snippets::AnnotationType;
use annotate_snippets::Renderer;
use annotate_snippets::Snippet;
use annotate_snippets::SourceAnnotation;

/// The largest `min` a field may ask for.
///
/// Padding is built before any sink sees the request, so an unbounded width
/// would be allocated in full even when the sink is about to refuse it.
pub const MAX_WIDTH: usize = 1 << 16;

/// A parsed format statement.
#[derive(Clone, Debug)]
pub struct Statement<'a> {
  text: &'a str,
  pieces: Vec<Piece>,
}

/// A component of a [`Statement`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Piece {
  /// Literal text, given as a range of the statement.
  Literal(Range<usize>),
  /// A replacement field.
  Field(Field),
}

/// A replacement field in a [`Statement`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Field {
  /// The index of the argument to insert.
  pub index: usize,
  /// The minimum width, in characters.
  pub min: usize,
  /// The maximum width, in characters.
  pub max: Option<usize>,
  /// Where padding is placed.
  pub align: Align,
  /// The range of the statement this field came from, braces included.
  pub span: Range<usize>,
}

/// Alignment of a padded field.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum Align {
  /// Pad on the right.
  #[default]
  Left,
  /// Pad on the left.
  Right,
  /// Pad on both sides; an odd space goes on the right.
  Center,
}

/// An error in a format statement.
#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
#[error("invalid format statement: {kind}")]
pub struct FormatError {
  kind: ErrorKind,
  span: Range<usize>,
}

/// The kind of a [`FormatError`].
#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum ErrorKind {
  /// A `{` with no matching `}`.
  #[error("unclosed `{{`")]
  UnclosedBrace,
  /// A field with an empty index.
  #[error("missing argument index")]
  MissingIndex,
  /// A width or index that is not a decimal number.
  #[error("expected a number")]
  BadNumber,
  /// A minimum width larger than [`MAX_WIDTH`].
  #[error("width is too large; at most {} is allowed", MAX_WIDTH)]
  WidthTooLarge,
  /// An alignment other than `<`, `>`, or `^`.
  #[error("unknown alignment; expected `<`, `>`, or `^`")]
  BadAlignment,
  /// A field with more than four components.
  #[error("too many components in field")]
  TooManyFields,
  /// A field that refers to an argument that was not passed.
  #[error("argument {index} does not exist; {count} arguments were passed")]
  IndexOutOfRange {
    /// The index in the field.
    index: usize,
    /// The number of arguments.
    count: usize,
  },
  /// An argument that no field refers to.
  #[error("argument {index} is never used")]
  UnreferencedArgument {
    /// The index of the unused argument.
    index: usize,
  },
}

impl FormatError {
  fn new(kind: ErrorKind, span: Range<usize>) -> Self {
    Self { kind, span }
  }

  /// Returns what went wrong.
  pub fn kind(&self) -> &ErrorKind {
    &self.kind
  }

  /// Returns the range of the statement the error refers to.
  pub fn span(&self) -> Range<usize> {
    self.span.clone()
  }

  /// Renders this error as a diagnostic pointing into `statement`, which
  /// should be the statement it was produced from.
  pub fn render(&self, statement: &str) -> String {
    let message = self.to_string();
    let label = self.kind.to_string();

    let mut snippet = Snippet {
      title: Some(Annotation {
        id: None,
        label: Some(&message),
        annotation_type: AnnotationType::Error,
      }),
      footer: Vec::new(),
      slices: Vec::new(),
    };

    let Range { mut start, mut end } = self.span.clone();
    end = end.min(statement.len());
    start = start.min(end);
    if !statement.is_empty() {
      if start == end {
        // Never point at zero characters.
        if end == statement.len() {
          start = end - 1;
        } else {
          end = start + 1;
        }
      }

      snippet.slices.push(annotate_snippets::Slice {
        source: statement,
        line_start: 1,
        origin: None,
        annotations: vec![SourceAnnotation {
          range: (start, end),
          label: &label,
          annotation_type: AnnotationType::Error,
        }],
        fold: false,
      });
    }

    let rendered = Renderer::plain().render(snippet).to_string();
    rendered
  }
}

impl<'a> Statement<'a> {
  /// Parses a statement.
  pub fn parse(text: &'a str) -> Result<Self, FormatError> {
    let bytes = text.as_bytes();
    let mut pieces = Vec::new();
    let mut literal = 0;
    let mut i = 0;

    fn flush(pieces: &mut Vec<Piece>, range: Range<usize>) {
      if !range.is_empty() {
        pieces.push(Piece::Literal(range));
      }
    }

    while i < bytes.len() {
      if bytes[i] != b'{' {
        i += 1;
        continue;
      }

      if bytes.get(i + 1) == Some(&b'{') {
        flush(&mut pieces, literal..i + 1);
        i += 2;
        literal = i;
        continue;
      }

      flush(&mut pieces, literal..i);
      let Some(close) = text[i + 1..].find('}').map(|n| n + i + 1) else {
        return Err(FormatError::new(ErrorKind::UnclosedBrace, i..text.len()));
      };

      pieces.push(Piece::Field(parse_field(text, i..close + 1)?));
      i = close + 1;
      literal = i;
    }

    flush(&mut pieces, literal..text.len());
    Ok(Self { text, pieces })
  }

  /// Returns the text this statement was parsed from.
  pub fn text(&self) -> &'a str {
    self.text
  }

  /// Returns the pieces of this statement, in order.
  pub fn pieces(&self) -> &[Piece] {
    &self.pieces
  }

  /// Returns the fields of this statement, in order.
  pub fn fields(&self) -> impl Iterator<Item = &Field> + '_ {
    self.pieces.iter().filter_map(|p| match p {
      Piece::Field(f) => Some(f),
      Piece::Literal(_) => None,
    })
  }

  /// Checks that every field refers to one of `count` arguments.
  pub fn check_indices(&self, count: usize) -> Result<(), FormatError> {
    match self.fields().find(|f| f.index >= count) {
      Some(f) => Err(FormatError::new(
        ErrorKind::IndexOutOfRange {
          index: f.index,
          count,
        },
        f.span.clone(),
      )),
      None => Ok(()),
    }
  }

  /// Checks that each of `count` arguments is referred to by some field.
  pub fn check_all_used(&self, count: usize) -> Result<(), FormatError> {
    let mut used = vec![false; count];
    for f in self.fields() {
      if let Some(u) = used.get_mut(f.index) {
        *u = true;
      }
    }

    match used.iter().position(|&u| !u) {
      Some(index) => Err(FormatError::new(
        ErrorKind::UnreferencedArgument { index },
        0..self.text.len(),
      )),
      None => Ok(()),
    }
  }
}

/// Parses the field occupying `span`, braces included.
fn parse_field(text: &str, span: Range<usize>) -> Result<Field, FormatError> {
  let mut field = Field {
    index: 0,
    min: 0,
    max: None,
    align: Align::Left,
    span: span.clone(),
  };

  let mut start = span.start + 1;
  let inner = &text[start..span.end - 1];
  for (n, component) in inner.split(',').enumerate() {
    let range = start..start + component.len();
    start = range.end + 1;

    match n {
      0 if component.is_empty() => {
        return Err(FormatError::new(ErrorKind::MissingIndex, span));
      }
      0 => field.index = parse_number(component, range)?,
      1 if component.is_empty() => {}
      1 => {
        field.min = parse_number(component, range.clone())?;
        if field.min > MAX_WIDTH {
          return Err(FormatError::new(ErrorKind::WidthTooLarge, range));
        }
      }
      2 if component.is_empty() => {}
      2 => field.max = Some(parse_number(component, range)?),
      3 => {
        field.align = match component {
          "" | "<" => Align::Left,
          ">" => Align::Right,
          "^" => Align::Center,
          _ => return Err(FormatError::new(ErrorKind::BadAlignment, range)),
        }
      }
      _ => {
        let range = range.start - 1..span.end - 1;
        return Err(FormatError::new(ErrorKind::TooManyFields, range));
      }
    }
  }

  Ok(field)
}

fn parse_number(
  component: &str,
  range: Range<usize>,
) -> Result<usize, FormatError> {
  if !component.bytes().all(|b| b.is_ascii_digit()) {
    return Err(FormatError::new(ErrorKind::BadNumber, range));
  }

  component
    .parse()
    .map_err(|_| FormatError::new(ErrorKind::BadNumber, range))
}
