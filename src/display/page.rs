use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

use super::cards::{cards, serving_size_label};
use crate::nutrition::dto::NutritionResult;
use crate::search::controller::{SearchController, SearchPhase};

const STYLE: &str = r#"
body{font-family:system-ui,sans-serif;background:#f4f1ea;margin:0;display:flex;justify-content:center}
main{max-width:42rem;width:100%;margin:2rem 1rem;padding:2rem;border-radius:1rem;background:#ffffffcc;box-shadow:0 4px 20px #0002}
h1{text-align:center}
form{display:flex;gap:.5rem;position:relative}
input{flex:1;padding:.6rem;border:1px solid #ccc;border-radius:.5rem}
button{padding:.6rem 1rem;border:0;border-radius:.5rem;background:#2563eb;color:#fff}
button:disabled{opacity:.5}
#suggestions{position:absolute;top:2.6rem;left:0;right:5.5rem;list-style:none;margin:0;padding:0;background:#fff;border:1px solid #ccc;border-radius:.5rem}
#suggestions[hidden]{display:none}
#suggestions li{padding:.6rem 1rem;cursor:pointer;text-transform:capitalize}
#suggestions li:hover{background:#eff6ff}
.result{margin-top:1.5rem;padding:1.5rem;background:#fff;border-radius:.5rem}
.result h2,.serving,.message,.empty{text-align:center}
.message{color:#d97706;font-style:italic}
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(10rem,1fr));gap:1rem}
.card{padding:1rem;border-radius:.5rem}
.card .label{font-size:.85rem;color:#555}
.card .value{font-size:1.5rem;font-weight:700}
.tone-blue{background:#eff6ff}.tone-green{background:#f0fdf4}.tone-yellow{background:#fefce8}
.tone-orange{background:#fff7ed}.tone-purple{background:#faf5ff}.tone-pink{background:#fdf2f8}
.tone-indigo{background:#eef2ff}.tone-red{background:#fef2f2}.tone-amber{background:#fffbeb}
.tone-teal{background:#f0fdfa}
"#;

const SCRIPT: &str = r#"
const input = document.getElementById('food');
const panel = document.getElementById('suggestions');
const form = document.getElementById('search');
input.addEventListener('input', async () => {
  const q = input.value.trim();
  if (!q) { panel.hidden = true; panel.replaceChildren(); return; }
  const res = await fetch('/api/suggestions?q=' + encodeURIComponent(q));
  const { suggestions } = await res.json();
  panel.replaceChildren(...suggestions.map(food => {
    const li = document.createElement('li');
    li.textContent = food;
    li.addEventListener('click', () => { input.value = food; panel.hidden = true; form.requestSubmit(); });
    return li;
  }));
  panel.hidden = suggestions.length === 0;
});
input.addEventListener('focus', () => { if (panel.children.length) panel.hidden = false; });
document.addEventListener('mousedown', e => { if (!form.contains(e.target)) panel.hidden = true; });
form.addEventListener('submit', e => {
  if (!input.value.trim()) { e.preventDefault(); return; }
  panel.hidden = true;
  form.querySelector('button').disabled = true;
  form.querySelector('button').textContent = 'Loading...';
});
"#;

/// Full search page for the controller's current state.
pub fn render_page(controller: &SearchController) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
    html.push_str("<title>Nutrition Checker</title><style>");
    html.push_str(STYLE);
    html.push_str("</style></head><body><main><h1>Nutrition Checker</h1>");

    render_form(&mut html, controller);

    match controller.phase() {
        SearchPhase::ResultShown => {
            if let Some(result) = controller.result() {
                render_result(&mut html, result);
            }
        }
        SearchPhase::NoResult => {
            html.push_str("<p class=\"empty\">No nutrition data found.</p>");
        }
        _ => {}
    }

    html.push_str("</main><script>");
    html.push_str(SCRIPT);
    html.push_str("</script></body></html>");
    html
}

fn render_form(html: &mut String, controller: &SearchController) {
    let disabled = if controller.input_enabled() { "" } else { " disabled" };
    let _ = write!(
        html,
        "<form id=\"search\" method=\"get\" action=\"/\" autocomplete=\"off\">\
         <input id=\"food\" name=\"food\" type=\"text\" placeholder=\"type food item\" required value=\"{}\"{disabled}>\
         <button type=\"submit\"{disabled}>{}</button>",
        encode_double_quoted_attribute(controller.query()),
        controller.submit_label(),
    );

    let hidden = if controller.panel_visible() { "" } else { " hidden" };
    let _ = write!(html, "<ul id=\"suggestions\"{hidden}>");
    for food in controller.suggestions() {
        let _ = write!(html, "<li>{}</li>", encode_text(food));
    }
    html.push_str("</ul></form>");
}

fn render_result(html: &mut String, result: &NutritionResult) {
    let _ = write!(
        html,
        "<section class=\"result\"><h2>{}</h2>",
        encode_text(&result.food)
    );
    if let Some(serving) = serving_size_label(result) {
        let _ = write!(
            html,
            "<p class=\"serving\">Serving Size: <strong>{serving}</strong></p>"
        );
    }
    if let Some(message) = &result.message {
        let _ = write!(html, "<p class=\"message\">{}</p>", encode_text(message));
    }

    html.push_str("<div class=\"grid\">");
    for card in cards(&result.nutrition) {
        let _ = write!(
            html,
            "<div class=\"card {}\"><div class=\"label\">{}</div><div class=\"value\">{}</div></div>",
            card.tone.css_class(),
            card.label,
            encode_text(&card.text()),
        );
    }
    html.push_str("</div></section>");
}
