use std::fmt::Write;

/// Render the mock login form for a session
pub fn render_login_page(session_id: &str, allowed_numbers: &[String]) -> String {
    let mut options = String::new();
    for number in allowed_numbers {
        let number = html_escape::encode_text(number);
        let _ = writeln!(options, "      <li><code>{}</code></li>", number);
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Mock login</title>
  <link rel="stylesheet" href="/static/login.css">
</head>
<body>
  <main>
    <h1>Log in</h1>
    <form method="post" action="/login">
      <input type="hidden" name="sessionId" value="{session_id}">
      <label for="phoneNumber">Phone number</label>
      <input type="text" id="phoneNumber" name="phoneNumber" required>
      <button type="submit">Log in</button>
    </form>
    <p>Any of these numbers has test data:</p>
    <ul>
{options}    </ul>
  </main>
</body>
</html>
"#,
        session_id = html_escape::encode_double_quoted_attribute(session_id),
        options = options,
    )
}
