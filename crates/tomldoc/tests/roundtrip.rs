//! Parse → render → reparse stability.

use tomldoc::{from_str, to_string, Table};

fn roundtrip(input: &str) -> (Table, Table) {
    let first = from_str(input).unwrap();
    let rendered = to_string(&first);
    let second = from_str(&rendered)
        .unwrap_or_else(|e| panic!("rendered output failed to reparse: {e}\n{rendered}"));
    (first, second)
}

fn assert_roundtrip(input: &str) {
    let (first, second) = roundtrip(input);
    assert_eq!(first, second);
}

#[test]
fn scalars_roundtrip() {
    assert_roundtrip(
        "s = \"text with \\\"quotes\\\" and \\t tab\"\nn = 42\nf = 3.5\nb = true\nneg = -17\n",
    );
}

#[test]
fn non_finite_floats_roundtrip() {
    assert_roundtrip("plus = inf\nminus = -inf\n");
}

#[test]
fn nested_tables_roundtrip() {
    assert_roundtrip("[a]\nx = 1\n[a.b.c]\ny = 2\n[other]\nz = 3\n");
}

#[test]
fn arrays_of_tables_roundtrip() {
    assert_roundtrip("[[srv]]\nhost = \"alpha\"\n[[srv]]\nhost = \"beta\"\nport = 2\n");
}

#[test]
fn inline_tables_resolve_to_equal_sections() {
    // Inline tables render as sections; the value trees stay equal.
    assert_roundtrip("point = {x = 1, y = 2}\nwrap = {inner = {deep = true}}\n");
}

#[test]
fn datetimes_roundtrip() {
    assert_roundtrip(
        "odt = 1979-05-27T07:32:00Z\nodt_frac = 1979-05-27T00:32:00.999999-07:00\nldt = 1979-05-27T07:32:00\nld = 1979-05-27\nlt = 07:32:00.5\n",
    );
}

#[test]
fn unicode_and_empty_keys_roundtrip() {
    assert_roundtrip("\"\" = \"empty key\"\n\"ʎǝʞ\" = \"unicode key\"\n\"a.b\" = \"dotted-looking\"\n");
}

#[test]
fn empty_containers_roundtrip() {
    assert_roundtrip("empty_array = []\n[empty_table]\n[deep.empty]\n");
}

#[test]
fn mixed_arrays_roundtrip() {
    assert_roundtrip("a = [1, \"two\", [3.0], {\"四\" = 4}]\n");
}

#[test]
fn rendering_is_stable_after_one_pass() {
    let first = from_str("b = 2\n[z]\nq = 1\n[a.c]\nd = [1, 2]\n").unwrap();
    let rendered = to_string(&first);
    let rerendered = to_string(&from_str(&rendered).unwrap());
    assert_eq!(rendered, rerendered);
}
