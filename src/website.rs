//! Static HTML export of the collection.

use crate::error::Result;
use crate::movie::{format_rating, Collection, Movie};
use std::fs;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_WEBSITE_PATH: &str = "movie_website.html";

const PAGE_HEAD: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>My Movie App</title>
<style>
  body { font-family: Arial, sans-serif; margin: 2rem; background: #fafafa; }
  .movies { display: flex; flex-wrap: wrap; gap: 1.5rem; }
  .movie { width: 220px; }
  .movie img { max-width: 200px; height: auto; }
  .movie h2 { font-size: 1.1rem; margin: 0.5rem 0 0.25rem; }
  .movie p { margin: 0.1rem 0; color: #444; }
</style>
</head>
<body>
<h1>My Movie Collection</h1>
"##;

const PAGE_TAIL: &str = "</body>\n</html>\n";

/// Escape text for use in element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn render_movie(movie: &Movie) -> String {
    let title = escape_html(&movie.title);
    let poster = match &movie.poster {
        Some(url) => format!(
            "  <img src=\"{}\" alt=\"{} poster\">\n",
            escape_html(url),
            title
        ),
        None => String::new(),
    };
    format!(
        "<div class=\"movie\">\n{}  <h2>{}</h2>\n  <p>Year: {}</p>\n  <p>Rating: {}</p>\n</div>\n",
        poster,
        title,
        movie.year,
        format_rating(movie.rating)
    )
}

pub fn render_website(movies: &Collection) -> String {
    let mut html = String::from(PAGE_HEAD);
    if movies.is_empty() {
        html.push_str("<p>No movies in the collection yet.</p>\n");
    } else {
        html.push_str("<div class=\"movies\">\n");
        for movie in movies {
            html.push_str(&render_movie(movie));
        }
        html.push_str("</div>\n");
    }
    html.push_str(PAGE_TAIL);
    html
}

pub fn write_website(movies: &Collection, path: &Path) -> Result<()> {
    let html = render_website(movies);
    fs::write(path, &html)?;
    debug!(bytes = html.len(), path = %path.display(), "wrote website");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Tom & Jerry <1>"), "Tom &amp; Jerry &lt;1&gt;");
        assert_eq!(escape_html(r#"say "hi" 'now'"#), "say &quot;hi&quot; &#39;now&#39;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_render_is_complete_document() {
        let html = render_website(&Collection::new());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.trim_end().ends_with("</html>"));
        assert!(html.contains("No movies in the collection yet."));
    }

    #[test]
    fn test_render_lists_each_movie() {
        let movies: Collection = vec![
            Movie::new("Heat", 1995, 8.3).with_poster("https://img/heat.jpg"),
            Movie::new("Alien", 1979, 9.0),
        ]
        .into_iter()
        .collect();
        let html = render_website(&movies);
        assert!(html.contains("<h2>Heat</h2>"));
        assert!(html.contains("<p>Year: 1995</p>"));
        assert!(html.contains("<p>Rating: 9.0</p>"));
        assert!(html.contains(r#"<img src="https://img/heat.jpg" alt="Heat poster">"#));
        assert_eq!(html.matches("<img").count(), 1);
        assert!(html.find("Heat").unwrap() < html.find("Alien").unwrap());
    }

    #[test]
    fn test_render_escapes_titles() {
        let movies: Collection = vec![Movie::new("<script>", 2000, 1.0)].into_iter().collect();
        let html = render_website(&movies);
        assert!(html.contains("<h2>&lt;script&gt;</h2>"));
        assert!(!html.contains("<h2><script>"));
    }

    #[test]
    fn test_write_website() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("site.html");
        write_website(&Collection::new(), &path).expect("write");
        assert!(std::fs::read_to_string(&path).unwrap().contains("My Movie Collection"));
    }
}
