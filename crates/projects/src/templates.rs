//! Starter files written into every new project.

/// File names and contents of the starter files for project `name`, in the
/// order they are written.
pub fn starter_files(name: &str) -> [(&'static str, String); 3] {
    [
        ("index.html", index_html(name)),
        ("style.css", style_css(name)),
        ("script.js", script_js(name)),
    ]
}

pub fn index_html(name: &str) -> String {
    let title = escape_html(name);
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         \x20   <meta charset=\"UTF-8\">\n\
         \x20   <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         \x20   <title>{title}</title>\n\
         \x20   <link rel=\"stylesheet\" href=\"style.css\">\n\
         </head>\n\
         <body>\n\
         \x20   <h1>{title}</h1>\n\
         \x20   <script src=\"script.js\"></script>\n\
         </body>\n\
         </html>\n"
    )
}

pub fn style_css(name: &str) -> String {
    // A literal "*/" would end the comment early.
    let name = name.replace("*/", "* /");
    format!("/* CSS for {name} */\n\nbody {{\n    font-family: sans-serif;\n}}")
}

pub fn script_js(name: &str) -> String {
    let header = name.replace(['\n', '\r'], " ");
    let literal = escape_js(name);
    format!("// JavaScript for {header}\n\nconsole.log('Hello, {literal}!');")
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Escapes `s` for use inside a single-quoted JavaScript string.
fn escape_js(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '<' => out.push_str("\\x3C"),
            c => out.push(c),
        }
    }
    out
}
