use indoc::indoc;
use std::env;
use std::fs;
use std::path::Path;

const ABOUT_REL: &str = "assets/aboutme.txt";

fn main() {
    let manifest = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    let about_basename = Path::new(ABOUT_REL)
        .file_name()
        .and_then(|s| s.to_str())
        .expect("invalid about asset filename");
    let about_path = Path::new(&manifest).join(ABOUT_REL);
    println!("cargo:rerun-if-changed={}", about_path.display());

    // The notepad shows the document's modification date as its "last saved"
    // stamp, so capture it here in RFC3339 form.
    let modified_rfc3339 = match fs::metadata(&about_path).and_then(|m| m.modified()) {
        Ok(t) => {
            let dt: chrono::DateTime<chrono::Local> = chrono::DateTime::from(t);
            dt.to_rfc3339()
        }
        Err(_) => String::new(),
    };

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");
    let gen_path = Path::new(&out_dir).join("generated_about.rs");

    // Copy the document into OUT_DIR so the generated source can embed it
    // with a path relative to OUT_DIR.
    let about_dest = Path::new(&out_dir).join(about_basename);
    fs::copy(&about_path, &about_dest).expect("failed to copy aboutme.txt to OUT_DIR");

    let escaped = modified_rfc3339.replace('"', "\\\"");
    let gen_src = format!(
        indoc!(
            r#"
                pub struct EmbeddedDocument {{ pub name: &'static str, pub content: &'static str, pub modified_rfc3339: &'static str }}

                pub const ABOUT_ME: EmbeddedDocument = EmbeddedDocument {{
                    name: "{basename}",
                    content: include_str!(concat!(env!("OUT_DIR"), "/{basename}")),
                    modified_rfc3339: "{rfc}",
                }};
            "#
        ),
        basename = about_basename,
        rfc = escaped,
    );
    fs::write(&gen_path, gen_src).expect("failed to write generated_about.rs to OUT_DIR");
}
