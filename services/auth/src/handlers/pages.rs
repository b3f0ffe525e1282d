//! Minimal HTML shells for the console. The real UI is served elsewhere; these
//! exist so the page gate has something to protect and redirect to.

use axum::response::Html;

use signage_auth_types::identity::AdminIdentity;

const LOGIN_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Signage Admin Login</title></head>
<body>
  <h1>Signage Admin</h1>
  <form id="login">
    <input type="email" name="email" placeholder="Email" required>
    <input type="password" name="password" placeholder="Password" required>
    <button type="submit">Sign in</button>
  </form>
  <a href="/login#forgot">Forgot password?</a>
</body>
</html>
"#;

/// `GET /login`, public.
pub async fn login_page() -> Html<&'static str> {
    Html(LOGIN_PAGE)
}

/// `GET /admin` and everything under it, behind the page gate.
pub async fn admin_page(AdminIdentity(session): AdminIdentity) -> Html<String> {
    Html(format!(
        "<!doctype html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>Signage Admin</title></head>\n<body><h1>Signage Admin</h1><p>Signed in as {}</p></body>\n</html>\n",
        escape_html(&session.email)
    ))
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
