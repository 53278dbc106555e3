/// Format an f64 in canonical TOML form.
/// Requirements:
/// - `nan`, `inf`, `-inf` spelled out (sign kept on `nan`)
/// - finite values use the shortest round-trip representation
/// - the result always re-parses as a TOML float, never as an integer
pub(crate) fn format_toml_f64(value: f64) -> String {
    if value.is_nan() {
        return if value.is_sign_negative() {
            String::from("-nan")
        } else {
            String::from("nan")
        };
    }
    if value.is_infinite() {
        return if value < 0.0 {
            String::from("-inf")
        } else {
            String::from("inf")
        };
    }
    let mut buf = ryu::Buffer::new();
    buf.format_finite(value).to_string()
}
