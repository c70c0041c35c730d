//! Print-ready page containing both faces.
//!
//! Export is handed to the host: the page opens the browser's print dialog,
//! from which the user can save a PDF. Nothing is returned programmatically.

use std::fmt::Write;

use super::RenderedFlyer;
use super::svg::escape;
use crate::layout::Face;

/// Wrap both faces in an HTML page. With `auto_print` the page opens the
/// print dialog as soon as it loads.
pub fn export_document(flyer: &RenderedFlyer, title: &str, auto_print: bool) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n",
        escape(title)
    );
    out.push_str(
        "<style>\
         body{background:#111827;color:#fff;font-family:Inter,Arial,sans-serif;margin:0;padding:24px}\
         section{margin:0 auto 24px;width:400px}\
         h3{font-size:24px;margin:0 0 8px}\
         svg{display:block;border-radius:8px;overflow:hidden}\
         @media print{body{background:#fff;padding:0}h3{display:none}section{page-break-after:always}}\
         </style>\n</head>\n<body>\n",
    );

    for face in Face::ALL {
        let heading = match face {
            Face::Front => "Front",
            Face::Back => "Back",
        };
        let _ = write!(out, "<section>\n<h3>{}</h3>\n{}\n</section>\n", heading, flyer.face(face));
    }

    if auto_print {
        out.push_str("<script>window.addEventListener('load', function () { window.print(); });</script>\n");
    }
    out.push_str("</body>\n</html>\n");
    out
}
