use weft::contract;
use weft::CStrSink;
use weft::Counter;
use weft::Error;
use weft::Flags;
use weft::Newline;
use weft::Sink;
use weft::Slice;

fn slices<'a>(text: &[&'a str]) -> Vec<Slice<'a>> {
  text.iter().copied().map(Slice::new).collect()
}

#[test]
fn round_trip() {
  let mut buf = [0xee; 5];
  let mut sink = CStrSink::new(&mut buf);
  sink.write(4, &slices(&["ab", "cd"]), Flags::NONE).unwrap();
  assert_eq!(sink.size(), 4);

  drop(sink);
  similar_asserts::assert_eq!(&buf, b"abcd\0");
}

#[test]
fn sequential_writes() {
  let mut buf = [0xee; 7];
  let mut sink = CStrSink::new(&mut buf);
  sink
    .write(3, &slices(&["foo"]), Flags::NONE)
    .unwrap()
    .write(3, &slices(&["bar"]), Flags::NONE)
    .unwrap();
  assert_eq!(sink.size(), 6);
  assert_eq!(sink.as_str(), "foobar");

  drop(sink);
  similar_asserts::assert_eq!(&buf, b"foobar\0");
}

#[test]
fn size_tracks_cumulative_total() {
  let words = ["a", "", "bcd", "ef", "", "ghijk", "l"];

  let mut buf = [0; 32];
  let mut sink = CStrSink::new(&mut buf);
  let mut expected = String::new();
  for word in words {
    sink.write(word.len(), &slices(&[word]), Flags::NONE).unwrap();
    expected.push_str(word);

    assert_eq!(sink.size(), expected.len());
    assert_eq!(sink.as_str(), expected);
    assert_eq!(sink.as_c_str().unwrap().to_str().unwrap(), expected);
  }
}

#[test]
fn boundary() {
  for total in 0..8 {
    let text = "abcdefgh";
    let parts = slices(&[&text[..total]]);

    let mut exact = vec![0xee; total + 1];
    let mut sink = CStrSink::new(&mut exact);
    sink.write(total, &parts, Flags::NONE).unwrap();
    assert_eq!(sink.remaining(), 0);
    assert_eq!(exact[total], 0);

    let mut short = vec![0xee; total];
    let mut sink = CStrSink::new(&mut short);
    let err = sink.write(total, &parts, Flags::NONE).unwrap_err();
    assert!(matches!(
      err,
      Error::CapacityExceeded { required, capacity }
        if required == total + 1 && capacity == total
    ));
    assert_eq!(sink.size(), 0);
    assert!(short.iter().all(|&b| b == 0xee));
  }
}

#[test]
fn failure_is_atomic() {
  let mut buf = [0xee; 10];
  let mut sink = CStrSink::new(&mut buf).with_newline(Newline::Lf);
  sink.write(5, &slices(&["hel", "lo"]), Flags::NONE).unwrap();

  let err = sink
    .write(5, &slices(&["w", "orld"]), Flags::NEWLINE)
    .unwrap_err();
  assert!(err.is_capacity_exceeded());
  assert_eq!(sink.size(), 5);

  let err = sink.write(5, &slices(&["world"]), Flags::NONE).unwrap_err();
  assert!(err.is_capacity_exceeded());
  assert_eq!(sink.size(), 5);

  drop(sink);
  similar_asserts::assert_eq!(&buf, b"hello\0\xee\xee\xee\xee");
}

#[test]
fn newline_then_terminator() {
  for newline in [Newline::Lf, Newline::CrLf, Newline::Cr] {
    let mut buf = [0xee; 16];
    let mut sink = CStrSink::new(&mut buf).with_newline(newline);
    sink.write(3, &slices(&["a", "bc"]), Flags::NEWLINE).unwrap();
    assert_eq!(sink.size(), 3);

    let end = 3 + newline.len();
    drop(sink);
    assert_eq!(&buf[..3], b"abc");
    assert_eq!(&buf[3..end], newline.as_str().as_bytes());
    assert_eq!(buf[end], 0);
    assert_eq!(buf[end + 1], 0xee);
  }
}

#[test]
fn newline_is_overwritten_by_next_write() {
  let mut buf = [0xee; 16];
  let mut sink = CStrSink::new(&mut buf).with_newline(Newline::CrLf);
  sink.write(3, &slices(&["foo"]), Flags::NEWLINE).unwrap();
  sink.write(3, &slices(&["bar"]), Flags::NONE).unwrap();

  assert_eq!(sink.as_str(), "foobar");
  assert_eq!(sink.as_c_str().unwrap().to_bytes(), b"foobar");
}

#[test]
fn raw_flags() {
  let mut buf = [0xee; 8];
  let mut sink = CStrSink::new(&mut buf).with_newline(Newline::Lf);
  sink
    .write(2, &slices(&["hi"]), Flags::from_bits(0x8000_0001))
    .unwrap();
  assert_eq!(sink.as_c_str().unwrap().to_bytes(), b"hi\n");
}

#[test]
fn counter_sizes_buffers() {
  let mut counter = Counter::new().with_newline(Newline::CrLf);
  weft::fmtln!(&mut counter, "{0}: {1}", "answer", 42).unwrap();

  let mut buf = vec![0; counter.required_capacity()];
  let mut sink = CStrSink::new(&mut buf).with_newline(Newline::CrLf);
  weft::fmtln!(&mut sink, "{0}: {1}", "answer", 42).unwrap();
  assert_eq!(sink.size(), 10);
  assert_eq!(sink.as_c_str().unwrap().to_bytes(), b"answer: 42\r\n");

  let mut buf = vec![0; counter.required_capacity() - 1];
  let mut sink = CStrSink::new(&mut buf).with_newline(Newline::CrLf);
  assert!(weft::fmtln!(&mut sink, "{0}: {1}", "answer", 42).is_err());
}

#[test]
fn lying_about_length_is_loud() {
  let mut buf = [0xee; 16];
  let mut sink = CStrSink::new(&mut buf);
  sink.write(2, &slices(&["ok"]), Flags::NONE).unwrap();

  let violation = contract::catch(|| {
    let _ = sink.write(1, &slices(&["too long"]), Flags::NONE);
  })
  .unwrap_err();
  assert_eq!(violation.kind(), contract::Kind::Precondition);

  assert_eq!(sink.size(), 2);
  assert_eq!(sink.as_str(), "ok");
}
