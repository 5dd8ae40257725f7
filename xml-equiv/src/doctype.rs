use serde::Serialize;
use xml_equiv_core::{DocTypeView, ModelError, XmlNode};

/// Identifiers and declarations of a document's DOCTYPE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocTypeReport {
    pub name: String,
    pub public: Option<String>,
    pub system: Option<String>,
    pub notations: Vec<NotationEntry>,
    pub entities: Vec<EntityEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotationEntry {
    pub name: String,
    pub public: Option<String>,
    pub system: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityEntry {
    pub name: String,
    pub parameter: bool,
    pub value: Option<String>,
    pub public: Option<String>,
    pub system: Option<String>,
    pub ndata: Option<String>,
}

/// Build the report for `document`, or `None` when it has no DOCTYPE.
///
/// Fails when a notation's identifiers cannot be read.
pub fn build_doctype_report(document: &XmlNode) -> Result<Option<DocTypeReport>, ModelError> {
    let Some(decl) = document.doctype() else {
        return Ok(None);
    };
    let view = DocTypeView::new(decl);

    let mut notations = Vec::new();
    for notation in view.notations() {
        notations.push(NotationEntry {
            name: notation.name().to_string(),
            public: notation.public()?.map(str::to_string),
            system: notation.system()?.map(str::to_string),
        });
    }

    let entities = view
        .entities()
        .map(|entity| EntityEntry {
            name: entity.name.clone(),
            parameter: entity.parameter,
            value: entity.value.clone(),
            public: entity.public_id.clone(),
            system: entity.system_id.clone(),
            ndata: entity.ndata.clone(),
        })
        .collect();

    Ok(Some(DocTypeReport {
        name: view.name().to_string(),
        public: view.public().map(str::to_string),
        system: view.system().map(str::to_string),
        notations,
        entities,
    }))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use xml_equiv_core::{parse_str, ModelError};

    use super::{build_doctype_report, NotationEntry};

    #[test]
    fn document_without_doctype_has_no_report() {
        let doc = parse_str("<r/>").expect("parse");
        assert_eq!(build_doctype_report(&doc), Ok(None));
    }

    #[test]
    fn notations_and_entities_are_listed() {
        let doc = parse_str(
            r#"<!DOCTYPE r PUBLIC "-//X//EN" "r.dtd" [
              <!NOTATION gif PUBLIC "image/gif" 'urn:gif'>
              <!ENTITY % p "x">
              <!ENTITY img SYSTEM "a.gif" NDATA gif>
            ]><r/>"#,
        )
        .expect("parse");
        let report = build_doctype_report(&doc)
            .expect("report")
            .expect("doctype present");

        assert_eq!(report.name, "r");
        assert_eq!(report.public.as_deref(), Some("-//X//EN"));
        assert_eq!(report.system.as_deref(), Some("r.dtd"));
        assert_eq!(
            report.notations,
            vec![NotationEntry {
                name: "gif".to_string(),
                public: Some("image/gif".to_string()),
                system: Some("urn:gif".to_string()),
            }]
        );
        assert_eq!(report.entities.len(), 2);
        assert!(report.entities[0].parameter);
        assert_eq!(report.entities[1].ndata.as_deref(), Some("gif"));
    }

    #[test]
    fn unreadable_notation_fails_the_report() {
        let doc = parse_str(r#"<!DOCTYPE r [<!NOTATION n SYSTEM bare>]><r/>"#).expect("parse");
        assert!(matches!(
            build_doctype_report(&doc),
            Err(ModelError::NotationSyntax { .. })
        ));
    }
}
