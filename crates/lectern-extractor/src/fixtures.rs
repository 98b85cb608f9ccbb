//! Builders for small PDF and EPUB files used by the tests
//!
//! Compiled for this crate's own tests and, behind the `test-fixtures`
//! feature, for the integration tests of dependent crates. Writers panic on
//! failure.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Write a PDF with one page per entry; an empty string makes a blank page
pub fn write_pdf(path: &Path, pages: &[&str]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let operations = if text.is_empty() {
            Vec::new()
        } else {
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ]
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

/// One manifest entry of a test EPUB
pub struct EpubItem<'a> {
    /// Manifest id, referenced from the spine
    pub id: &'a str,
    /// Path inside `OEBPS/`
    pub href: &'a str,
    /// Declared media type
    pub media_type: &'a str,
    /// Raw file contents
    pub body: &'a str,
}

impl<'a> EpubItem<'a> {
    /// XHTML chapter wrapping `paragraph` in a `<p>`
    pub fn chapter(id: &'a str, href: &'a str, paragraph: &'a str) -> Self {
        Self {
            id,
            href,
            media_type: "application/xhtml+xml",
            body: paragraph,
        }
    }
}

/// Write an EPUB whose manifest lists `items` and whose spine lists `spine`
pub fn write_epub(path: &Path, items: &[EpubItem<'_>], spine: &[&str]) {
    let file = File::create(path).unwrap();
    let mut zip = ZipWriter::new(file);
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let deflated = SimpleFileOptions::default();

    zip.start_file("mimetype", stored).unwrap();
    zip.write_all(b"application/epub+zip").unwrap();

    zip.start_file("META-INF/container.xml", deflated).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#,
    )
    .unwrap();

    let manifest: String = items
        .iter()
        .map(|item| {
            format!(
                r#"    <item id="{}" href="{}" media-type="{}"/>
"#,
                item.id, item.href, item.media_type
            )
        })
        .collect();
    let itemrefs: String = spine
        .iter()
        .map(|id| format!("    <itemref idref=\"{}\"/>\n", id))
        .collect();
    let opf = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="2.0" unique-identifier="bookid">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
    <dc:title>Lectern Test Book</dc:title>
    <dc:language>en</dc:language>
    <dc:identifier id="bookid">urn:uuid:00000000-0000-0000-0000-000000000001</dc:identifier>
  </metadata>
  <manifest>
    <item id="ncx" href="toc.ncx" media-type="application/x-dtbncx+xml"/>
{}  </manifest>
  <spine toc="ncx">
{}  </spine>
</package>"#,
        manifest, itemrefs
    );
    zip.start_file("OEBPS/content.opf", deflated).unwrap();
    zip.write_all(opf.as_bytes()).unwrap();

    zip.start_file("OEBPS/toc.ncx", deflated).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8"?>
<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/" version="2005-1">
  <head><meta name="dtb:uid" content="urn:uuid:00000000-0000-0000-0000-000000000001"/></head>
  <docTitle><text>Lectern Test Book</text></docTitle>
  <navMap></navMap>
</ncx>"#,
    )
    .unwrap();

    for item in items {
        let body = if item.media_type == "application/xhtml+xml" {
            format!(
                r#"<?xml version="1.0" encoding="UTF-8"?>
<html xmlns="http://www.w3.org/1999/xhtml"><head><title></title></head>
<body><p>{}</p></body></html>"#,
                item.body
            )
        } else {
            item.body.to_string()
        };
        zip.start_file(format!("OEBPS/{}", item.href), deflated).unwrap();
        zip.write_all(body.as_bytes()).unwrap();
    }

    zip.finish().unwrap();
}
