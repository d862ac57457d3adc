use super::{confidence_label, Invitation, InvitationReport};
use std::fmt::Write as _;

const STYLE: &str = "\
body { font-family: Arial, sans-serif; margin: 20px; }
.invitation { margin-bottom: 20px; padding: 10px; border: 1px solid #ddd; }
.contact { margin: 5px 0; }
.confidence { display: inline-block; padding: 2px 6px; border-radius: 3px; font-size: 0.8em; margin-left: 10px; }
.confidence.high { background-color: #d4edda; color: #155724; }
.confidence.medium { background-color: #fff3cd; color: #856404; }
.confidence.low { background-color: #f8d7da; color: #721c24; }
.preview { margin: 5px 0; padding: 5px; background: #f5f5f5; white-space: pre-wrap; }
.whatsapp-link { margin-right: 10px; }
.skipped { margin-top: 40px; padding-top: 20px; border-top: 2px solid #ddd; }
.skipped li { margin: 5px 0; color: #888; }
";

pub fn render_html(report: &InvitationReport) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<title>WhatsApp Invitations</title>\n<style>\n");
    out.push_str(STYLE);
    out.push_str("</style>\n</head>\n<body>\n<h1>WhatsApp Invitations</h1>\n<ol>\n");

    for (index, invitation) in report.invitations.iter().enumerate() {
        push_invitation(&mut out, index, invitation);
    }
    out.push_str("</ol>\n");

    let not_found: Vec<&String> = report.not_found.iter().chain(&report.no_phone).collect();
    if !report.user_skipped.is_empty() || !not_found.is_empty() {
        out.push_str("<div class=\"skipped\">\n");
        push_name_list(&mut out, "Skipped Names", report.user_skipped.iter());
        push_name_list(&mut out, "Not Found Names", not_found.into_iter());
        out.push_str("</div>\n");
    }

    let _ = writeln!(
        out,
        "<footer>Generated {}</footer>",
        escape_html(&report.generated_at)
    );
    out.push_str("</body>\n</html>\n");
    out
}

fn push_invitation(out: &mut String, index: usize, invitation: &Invitation) {
    let _ = writeln!(out, "<li class=\"invitation\" id=\"invitation-{index}\">");
    let _ = writeln!(out, "<h2>Invitation {}</h2>", index + 1);
    let _ = writeln!(
        out,
        "<div class=\"guest\">{}</div>",
        escape_html(&invitation.entry)
    );

    for contact in &invitation.contacts {
        let _ = writeln!(
            out,
            "<div class=\"contact\"><strong>{}</strong> {}<span class=\"confidence {}\">{}% match</span></div>",
            escape_html(&contact.name),
            escape_html(&contact.phone),
            confidence_label(contact.confidence),
            (contact.confidence * 100.0).round()
        );
    }

    let _ = writeln!(
        out,
        "<div class=\"preview\">{}</div>",
        escape_html(&invitation.message)
    );
    out.push_str("<div class=\"whatsapp-links\">\n");
    for contact in &invitation.contacts {
        let _ = writeln!(
            out,
            "<a class=\"whatsapp-link\" href=\"{}\" target=\"_blank\">Open WhatsApp ({})</a>",
            escape_html(&contact.link),
            escape_html(&contact.phone)
        );
    }
    out.push_str("</div>\n</li>\n");
}

fn push_name_list<'a>(out: &mut String, title: &str, names: impl Iterator<Item = &'a String>) {
    let _ = writeln!(out, "<h2>{title}</h2>\n<ul>");
    for name in names {
        let _ = writeln!(out, "<li>{}</li>", escape_html(name));
    }
    out.push_str("</ul>\n");
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
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
