//! Property-based tests for XMP keyword merging.

#[cfg(test)]
mod proptest_tests {
    use crate::merge::xmp::{add_keywords, ensure_namespace, LIGHTROOM_NAMESPACE};
    use proptest::prelude::*;
    use regex::Regex;

    fn document_with_bag(existing: &[String]) -> String {
        let mut doc = String::from(
            "<x:xmpmeta xmlns:x=\"adobe:ns:meta/\">\n <rdf:RDF>\n  <rdf:Description rdf:about=\"\"\n    xmlns:xmp=\"http://ns.adobe.com/xap/1.0/\">\n   <lr:hierarchicalSubject>\n    <rdf:Bag>\n",
        );
        for keyword in existing {
            doc.push_str(&format!("     <rdf:li>{}</rdf:li>\n", keyword));
        }
        doc.push_str("    </rdf:Bag>\n   </lr:hierarchicalSubject>\n  </rdf:Description>\n </rdf:RDF>\n</x:xmpmeta>\n");
        doc
    }

    fn bag_entries(doc: &str) -> Vec<String> {
        let bag = Regex::new(r"(?s)<rdf:Bag>(.*?)</rdf:Bag>").unwrap();
        let entry = Regex::new(r"<rdf:li>(.*?)</rdf:li>").unwrap();
        let items = bag.captures(doc).unwrap().get(1).unwrap().as_str();
        entry
            .captures_iter(items)
            .map(|c| c[1].to_string())
            .collect()
    }

    proptest! {
        /// Property: existing entries keep their order and new ones follow
        #[test]
        fn add_keywords_is_additive(
            existing in prop::collection::vec("[a-zA-Z0-9 _|-]{1,12}", 0..5),
            added in prop::collection::vec("[a-zA-Z0-9 _|-]{1,12}", 1..5),
        ) {
            let doc = document_with_bag(&existing);
            let merged = add_keywords(&doc, &added).document().to_string();

            let mut expected = existing.clone();
            expected.extend(added.iter().cloned());
            prop_assert_eq!(bag_entries(&merged), expected);
        }

        /// Property: only the namespace declaration is added
        #[test]
        fn ensure_namespace_adds_only_the_declaration(
            head in "[a-zA-Z0-9 =\"<>:/._-]{0,30}",
            tail in "[a-zA-Z0-9 =\"<>:/._-]{0,30}",
        ) {
            prop_assume!(!head.contains("xmlns:") && !tail.contains("xmlns:"));
            let doc = format!(
                "{}\n    xmlns:xmp=\"http://ns.adobe.com/xap/1.0/\"{}",
                head, tail
            );
            let result = ensure_namespace(&doc).into_owned();
            let declaration = format!("xmlns:lr=\"{}\"\n    ", LIGHTROOM_NAMESPACE);

            prop_assert_eq!(result.matches("xmlns:lr=").count(), 1);
            prop_assert_eq!(result.len(), doc.len() + declaration.len());
            prop_assert_eq!(result.replacen(&declaration, "", 1), doc);
        }

        /// Property: merging twice never duplicates the container or namespace
        #[test]
        fn add_keywords_twice_keeps_structure(
            added in prop::collection::vec("[a-zA-Z0-9_]{1,8}", 1..4),
        ) {
            let doc = "<rdf:Description rdf:about=\"\"\n    xmlns:xmp=\"http://ns.adobe.com/xap/1.0/\">\n  </rdf:Description>\n";
            let once = add_keywords(doc, &added).document().to_string();
            let twice = add_keywords(&once, &added).document().to_string();

            prop_assert_eq!(twice.matches("<lr:hierarchicalSubject>").count(), 1);
            prop_assert_eq!(twice.matches("xmlns:lr=").count(), 1);
            prop_assert_eq!(bag_entries(&twice).len(), added.len() * 2);
        }
    }
}
