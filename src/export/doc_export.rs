use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::document::GameDesignDocument;

const PURPLE: &str = "#9333ea";
const CELL: &str = "padding: 8px; vertical-align: top;";
const LABEL: &str = "font-size: 10px; font-weight: bold; text-transform: uppercase; color: #555; display: block; margin-bottom: 4px;";
const VALUE: &str = "border-bottom: 1px solid #ddd; padding-bottom: 2px; display: block; min-height: 20px; width: 100%; font-family: Arial, sans-serif; white-space: pre-wrap; word-wrap: break-word; font-size: 11px;";

/// `Canvas_<title>.<ext>` with whitespace runs collapsed to `_`.
pub fn export_file_name(doc: &GameDesignDocument, ext: &str) -> String {
    let title = doc.title.split_whitespace().collect::<Vec<_>>().join("_");
    let title = title.replace(['/', '\\', ':', '*', '?', '"', '<', '>', '|'], "");

    if title.is_empty() {
        format!("Canvas_sem_titulo.{ext}")
    } else {
        format!("Canvas_{title}.{ext}")
    }
}

/// Writes the Word-compatible HTML document to `path`.
pub fn write_doc(doc: &GameDesignDocument, path: &Path) -> Result<()> {
    // Word needs the BOM to pick UTF-8 for .doc files.
    let mut bytes = Vec::from("\u{feff}".as_bytes());
    bytes.extend_from_slice(render_word_html(doc).as_bytes());

    fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "exported canvas as DOC");
    Ok(())
}

/// Renders the canvas as standalone HTML that word processors open as a
/// document. Reads the document's fields directly, not the screen state.
pub fn render_word_html(doc: &GameDesignDocument) -> String {
    let ctx = &doc.education_context;
    let mut html = String::new();

    html.push_str(&head(&doc.title));
    html.push_str(&format!(
        "<h1>Canvas de Gamificação: {}</h1>\n<br/>\n",
        escape(&doc.title)
    ));

    // 1. Curriculum
    open_box(&mut html, "1. RELAÇÃO COM O CURRÍCULO");
    html.push_str("<table>\n");
    row2(&mut html, ("Área", &ctx.area), ("Ano/Bimestre", &ctx.grade_level));
    row2(&mut html, ("Disciplina", &ctx.discipline), ("Tema", &ctx.theme));
    row1(&mut html, "Habilidades BNCC", &ctx.bncc_skills);
    row1(&mut html, "Ref. Bibliográfica", &ctx.bibliography);
    html.push_str("</table>\n");
    close_box(&mut html);

    // 2. Style
    open_box(&mut html, "2. ESTILO DO JOGO");
    html.push_str("<table>\n");
    row2(&mut html, ("Gênero", &doc.genre), ("Plataforma", &doc.platform));
    row1(&mut html, "Público Alvo", &doc.target_audience);
    row1(&mut html, "Requisitos Técnicos", &doc.technical_requirements);
    html.push_str("</table>\n");
    close_box(&mut html);

    // 3. Narrative
    open_box(&mut html, "3. NARRATIVA DO JOGO");
    field_block(&mut html, "Sinopse", &doc.synopsis);
    table(
        &mut html,
        "Personagens",
        ["Nome", "Papel", "Descrição"],
        doc.characters
            .iter()
            .map(|c| [c.name.as_str(), c.role.as_str(), c.description.as_str()]),
    );
    table(
        &mut html,
        "Fases",
        ["Fase", "Objetivo", "Ambiente"],
        doc.levels
            .iter()
            .map(|l| [l.name.as_str(), l.objective.as_str(), l.environment.as_str()]),
    );
    close_box(&mut html);

    open_box(&mut html, "4. FLUXO DO JOGO");
    field_block(&mut html, "Fluxo", &doc.game_flow);
    close_box(&mut html);

    open_box(&mut html, "5. CHEFES E INIMIGOS");
    field_block(&mut html, "Inimigos e Obstáculos", &doc.enemies_and_obstacles);
    close_box(&mut html);

    open_box(&mut html, "MECÂNICAS");
    html.push_str("<ul>\n");
    for mechanic in &doc.gameplay_mechanics {
        html.push_str(&format!("<li>{}</li>\n", escape_multiline(mechanic)));
    }
    html.push_str("</ul>\n");
    close_box(&mut html);

    let content = &doc.programmatic_content;
    open_box(&mut html, "CONTEÚDO PROGRAMÁTICO");
    field_block(&mut html, "Introdução", &content.intro);
    field_block(&mut html, "Condição de Vitória", &content.victory_condition);
    field_block(&mut html, "Condição de Derrota", &content.defeat_condition);
    close_box(&mut html);

    html.push_str("</body>\n</html>\n");
    html
}

fn head(title: &str) -> String {
    format!(
        "<html xmlns:o='urn:schemas-microsoft-com:office:office' xmlns:w='urn:schemas-microsoft-com:office:word' xmlns='http://www.w3.org/TR/REC-html40'>
<head>
<meta charset='utf-8'>
<title>{title}</title>
<style>
body {{ font-family: 'Arial', sans-serif; font-size: 11px; color: #333; line-height: 1.4; }}
table {{ width: 100%; border-collapse: collapse; margin-bottom: 15px; table-layout: fixed; }}
.box {{ border: 2px solid {PURPLE}; border-radius: 8px; padding: 15px; margin-bottom: 25px; page-break-inside: avoid; }}
.header-tag {{ background: white; color: {PURPLE}; border: 2px solid {PURPLE}; padding: 5px 15px; border-radius: 20px; font-weight: bold; display: inline-block; font-size: 14px; }}
.grid th {{ background-color: #f3e8ff; color: {PURPLE}; text-align: left; padding: 6px; border: 1px solid #ddd; font-size: 10px; text-transform: uppercase; }}
.grid td {{ padding: 6px; border: 1px solid #ddd; vertical-align: top; }}
h1 {{ background-color: {PURPLE}; color: white; text-align: center; padding: 20px; margin: 0; font-size: 24px; text-transform: uppercase; }}
</style>
</head>
<body>
",
        title = escape(title)
    )
}

fn open_box(html: &mut String, heading: &str) {
    html.push_str(&format!(
        "<div class=\"box\">\n<div style=\"margin-top: -28px; margin-bottom: 10px;\"><span class=\"header-tag\">{heading}</span></div>\n"
    ));
}

fn close_box(html: &mut String) {
    html.push_str("</div>\n");
}

fn cell(label: &str, value: &str, attrs: &str) -> String {
    format!(
        "<td {attrs} style=\"{CELL}\"><span style=\"{LABEL}\">{label}:</span><div style=\"{VALUE}\">{}</div></td>",
        escape_multiline(value)
    )
}

fn row2(html: &mut String, left: (&str, &str), right: (&str, &str)) {
    html.push_str(&format!(
        "<tr>{}{}</tr>\n",
        cell(left.0, left.1, "width=\"50%\""),
        cell(right.0, right.1, "width=\"50%\"")
    ));
}

fn row1(html: &mut String, label: &str, value: &str) {
    html.push_str(&format!("<tr>{}</tr>\n", cell(label, value, "colspan=\"2\"")));
}

fn field_block(html: &mut String, label: &str, value: &str) {
    html.push_str(&format!(
        "<div style=\"{CELL} margin-bottom: 10px;\"><span style=\"{LABEL}\">{label}:</span><div style=\"{VALUE}\">{}</div></div>\n",
        escape_multiline(value)
    ));
}

fn table<'a>(
    html: &mut String,
    label: &str,
    headers: [&str; 3],
    rows: impl Iterator<Item = [&'a str; 3]>,
) {
    html.push_str(&format!(
        "<div style=\"{CELL}\"><span style=\"{LABEL}\">{label}:</span></div>\n<table class=\"grid\">\n<tr>"
    ));
    for h in headers {
        html.push_str(&format!("<th>{h}</th>"));
    }
    html.push_str("</tr>\n");
    for row in rows {
        html.push_str("<tr>");
        for value in row {
            html.push_str(&format!("<td>{}</td>", escape_multiline(value)));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</table>\n");
}

fn escape(text: &str) -> String {
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

fn escape_multiline(text: &str) -> String {
    escape(text).replace('\n', "<br>")
}
