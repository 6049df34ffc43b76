//! Property test: any sequence of issuance calls by whitelisted issuers
//! yields pairwise-distinct EduIDs, and the indices stay exact.

use std::collections::HashSet;

use proptest::prelude::*;

use credchain_core::{AccountAddress, DocumentHash};
use credchain_registry::{IssueRequest, Registry};

const ADMIN: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

const ISSUERS: [&str; 3] = [
    "0x3c44cdddb6a900fa2b585dd299e03d12fa4293bc",
    "0x90f79bf6eb2c4f870365e785982e1f101e93b906",
    "0x15d34aaf54267db7d7c367839aaf71a00a2c6a65",
];

const STUDENTS: [&str; 3] = [
    "0x70997970c51812dc3a010c7d01b50e0d17dc79c8",
    "0x9965507d1a55bcc2695c58ba16fb37d819b0a4dc",
    "0x976ea74026e726554db657fa54763abd0c3a0aa9",
];

fn addr(s: &str) -> AccountAddress {
    AccountAddress::new(s).unwrap()
}

proptest! {
    #[test]
    fn issued_edu_ids_are_pairwise_distinct(
        calls in proptest::collection::vec((0usize..3, 0usize..3), 1..80)
    ) {
        let mut registry = Registry::new(addr(ADMIN));
        for issuer in ISSUERS {
            registry
                .set_issuer_status(&addr(ADMIN), addr(issuer), true, "Institution")
                .unwrap();
        }

        let mut issued = Vec::new();
        for (issuer_idx, student_idx) in calls {
            let request = IssueRequest {
                student_wallet: addr(STUDENTS[student_idx]),
                student_name: "Student".to_string(),
                institution_name: "Institution".to_string(),
                credential_type: "degree".to_string(),
                course_or_program: "Program".to_string(),
                document_hash: DocumentHash::hash_bytes(b"doc"),
            };
            let edu_id = registry
                .issue_credential(&addr(ISSUERS[issuer_idx]), request)
                .unwrap();
            issued.push((edu_id, student_idx));
        }

        // Pairwise distinct.
        let unique: HashSet<_> = issued.iter().map(|(id, _)| id.clone()).collect();
        prop_assert_eq!(unique.len(), issued.len());
        prop_assert_eq!(registry.credential_count(), issued.len());

        // Each student's index is exactly their issuances, in order.
        for (student_idx, student) in STUDENTS.iter().enumerate() {
            let expected: Vec<_> = issued
                .iter()
                .filter(|(_, s)| *s == student_idx)
                .map(|(id, _)| id.clone())
                .collect();
            prop_assert_eq!(registry.student_credentials(&addr(student)), expected.as_slice());
        }
    }
}
