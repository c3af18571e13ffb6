use super::{ConvertError, ConvertResult};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

/// Extract the paragraph text of a Word document (OOXML).
pub fn docx_to_markdown(path: &Path) -> ConvertResult<String> {
    let xml = read_archive_entry(path, "word/document.xml")?;
    paragraphs_from_xml(&xml, path)
}

/// Extract the text of a PowerPoint presentation (OOXML), one `## Slide N`
/// section per slide in slide order.
pub fn pptx_to_markdown(path: &Path) -> ConvertResult<String> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file).map_err(|e| ConvertError::parse(path, e))?;

    let mut slides: Vec<(usize, String)> = archive
        .file_names()
        .filter_map(|name| slide_index(name).map(|index| (index, name.to_string())))
        .collect();
    slides.sort();

    let mut out = String::new();
    for (index, name) in slides {
        let mut xml = String::new();
        archive
            .by_name(&name)
            .map_err(|e| ConvertError::parse(path, e))?
            .read_to_string(&mut xml)?;

        let body = paragraphs_from_xml(&xml, path)?;

        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("## Slide {}\n\n{}\n", index, body.trim_end()));
    }

    Ok(out)
}

fn read_archive_entry(path: &Path, entry: &str) -> ConvertResult<String> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file).map_err(|e| ConvertError::parse(path, e))?;

    let mut content = String::new();
    archive
        .by_name(entry)
        .map_err(|_| ConvertError::parse(path, format!("missing {}", entry)))?
        .read_to_string(&mut content)?;

    Ok(content)
}

/// Collect the character runs of every paragraph element. Works for both
/// Word (`w:p`/`w:t`) and DrawingML (`a:p`/`a:t`) markup since only local
/// names are compared.
fn paragraphs_from_xml(xml: &str, path: &Path) -> ConvertResult<String> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"t" => in_text = true,
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    if !current.trim().is_empty() {
                        paragraphs.push(std::mem::take(&mut current));
                    } else {
                        current.clear();
                    }
                }
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"br" => current.push('\n'),
                b"tab" => current.push('\t'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                let chunk = t.unescape().map_err(|e| ConvertError::parse(path, e))?;
                current.push_str(&chunk);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(ConvertError::parse(path, e)),
        }
    }

    if !current.trim().is_empty() {
        paragraphs.push(current);
    }

    Ok(paragraphs.join("\n\n"))
}

fn slide_index(entry_name: &str) -> Option<usize> {
    entry_name
        .strip_prefix("ppt/slides/slide")?
        .strip_suffix(".xml")?
        .parse()
        .ok()
}
