use std::fmt;

use byteyarn::YarnBox;
use weft::arg;
use weft::engine;
use weft::statement::ErrorKind;
use weft::Arg;
use weft::CStrSink;
use weft::Engine;
use weft::Error;
use weft::Flags;
use weft::Newline;
use weft::Sink;
use weft::Slice;
use weft::Stream;

/// Records every write it receives.
#[derive(Default)]
struct Recorder {
  writes: Vec<(usize, Vec<String>, Flags)>,
}

impl Sink for Recorder {
  fn write(
    &mut self,
    total_len: usize,
    slices: &[Slice],
    flags: Flags,
  ) -> Result<&mut Self, Error> {
    let slices = slices.iter().map(|s| s.as_str().to_string()).collect();
    self.writes.push((total_len, slices, flags));
    Ok(self)
  }
}

struct Point {
  x: i32,
  y: i32,
}

impl Arg for Point {
  fn shim(&self) -> YarnBox<'_, str> {
    YarnBox::<str>::from_fmt(format_args!("({}, {})", self.x, self.y))
  }
}

struct Celsius(f64);

impl fmt::Display for Celsius {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{:.1}°C", self.0)
  }
}

#[test]
fn slices_in_statement_order() {
  let mut rec = Recorder::default();
  weft::fmt!(&mut rec, "<{1}|{0}|{1}>", "a", "bc").unwrap();

  assert_eq!(rec.writes.len(), 1);
  let (total, slices, flags) = &rec.writes[0];
  assert_eq!(*total, 9);
  similar_asserts::assert_eq!(
    slices,
    &["<", "bc", "|", "a", "|", "bc", ">"].map(String::from).to_vec()
  );
  assert_eq!(*flags, Flags::NONE);
}

#[test]
fn newline_variants_set_the_flag() {
  let mut rec = Recorder::default();
  weft::fmtln!(&mut rec, "x").unwrap();
  weft::spliceln!(&mut rec, 1, 2).unwrap();
  weft::splice!(&mut rec).unwrap();

  let flags = rec.writes.iter().map(|w| w.2).collect::<Vec<_>>();
  assert_eq!(flags, [Flags::NEWLINE, Flags::NEWLINE, Flags::NONE]);
  assert_eq!(rec.writes[2].0, 0);
  assert!(rec.writes[2].1.is_empty());
}

#[test]
fn user_types() {
  let mut out = String::new();
  weft::fmt!(
    &mut out,
    "{0} is {1}; {2}",
    Point { x: 1, y: -2 },
    arg::display(&Celsius(21.5)),
    None::<&str>,
  )
  .unwrap();
  similar_asserts::assert_eq!(out, "(1, -2) is 21.5°C; ");
}

#[test]
fn stream_gets_whole_statements() {
  let mut sink = Stream::new(Vec::new()).with_newline(Newline::CrLf);
  for i in 0..3 {
    weft::fmtln!(&mut sink, "line {0,2,,>}", i).unwrap();
  }

  let out = String::from_utf8(sink.into_inner()).unwrap();
  similar_asserts::assert_eq!(out, "line  0\r\nline  1\r\nline  2\r\n");
}

#[test]
fn fixed_sink_through_the_engine() {
  let mut buf = [0xee; 12];
  let mut sink = CStrSink::new(&mut buf).with_newline(Newline::Lf);

  weft::fmtln!(&mut sink, "{0}={1}", "k", 10).unwrap();
  assert_eq!(sink.size(), 4);

  let err = weft::fmt!(&mut sink, "{0,8}", "v").unwrap_err();
  assert!(err.is_capacity_exceeded());

  weft::fmt!(&mut sink, "{0,6}|", "v").unwrap();
  assert_eq!(sink.as_str(), "k=10v     |");
  assert_eq!(sink.remaining(), 0);
}

#[test]
fn format_errors() {
  let mut out = String::from("untouched");

  let err = weft::fmt!(&mut out, "{0} {1}", 1).unwrap_err();
  let Error::Format(e) = &err else {
    panic!("expected a format error, got {err:?}");
  };
  assert_eq!(e.kind(), &ErrorKind::IndexOutOfRange { index: 1, count: 1 });
  assert_eq!(e.span(), 4..7);
  assert!(e.render("{0} {1}").contains("argument 1 does not exist"));

  let err = weft::fmt!(&mut out, "{0", 1).unwrap_err();
  assert!(matches!(
    err,
    Error::Format(ref e) if e.kind() == &ErrorKind::UnclosedBrace
  ));
  assert_eq!(err.to_string(), "invalid format statement: unclosed `{`");

  assert_eq!(out, "untouched");
}

#[test]
fn strict_engine() {
  let strict = Engine::new(engine::Options {
    unreferenced: engine::Unreferenced::Error,
  });

  let mut out = String::new();
  strict.fmt(&mut out, "{1}{0}", &[&"a", &"b"]).unwrap();
  strict.splice(&mut out, &[&"c"]).unwrap();
  assert_eq!(out, "bac");

  assert!(strict.fmtln(&mut out, "{0}", &[&"a", &"b"]).is_err());
  assert_eq!(out, "bac");
}
