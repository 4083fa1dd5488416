// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::NaiveDate;
use folio_core::{DocumentMetadata, ErrorKind, EventBus, FakeClock, SequentialIdGen, Stage};

type TestPipeline = Pipeline<FakeClock, SequentialIdGen>;

fn setup(titles: &[(&str, &str)]) -> (Arc<TestPipeline>, Vec<DocumentId>) {
    let pipeline = Arc::new(Pipeline::new(
        FakeClock::new(),
        SequentialIdGen::new("doc"),
        EventBus::new(),
    ));
    let ids = titles
        .iter()
        .map(|(title, language)| {
            pipeline
                .ingest(DocumentMetadata::new(*title, *language, 10))
                .unwrap()
                .id
        })
        .collect();
    (pipeline, ids)
}

fn queue(pipeline: &Arc<TestPipeline>, page_size: usize) -> AssignmentQueue<FakeClock, SequentialIdGen> {
    AssignmentQueue::new(pipeline.clone(), &QueueConfig { page_size })
}

fn ids_of(docs: impl Iterator<Item = Document>) -> Vec<DocumentId> {
    docs.map(|d| d.id).collect()
}

const LIBRARY: &[(&str, &str)] = &[
    ("Hindi Poetry Collection", "Hindi"),
    ("Sanskrit Grammar Volume 1", "Sanskrit"),
    ("Tamil Literature", "Tamil"),
    ("Sanskrit Grammar Volume 2", "Sanskrit"),
];

#[test]
fn pending_reflects_live_pipeline_state() {
    let (pipeline, ids) = setup(LIBRARY);
    let queue = queue(&pipeline, 5);
    assert_eq!(ids_of(queue.pending_for_assignment(None)), ids);

    pipeline.assign(&ids[0], Stage::Upload, "Admin").unwrap();
    assert_eq!(ids_of(queue.pending_for_assignment(None)), ids[1..].to_vec());

    // Completing opens the next stage, putting the document back in the queue
    let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    pipeline.complete(&ids[0], Stage::Upload, day).unwrap();
    assert_eq!(queue.pending_for_assignment(None).count(), 4);
}

#[test]
fn explicit_filter_overrides_active_one() {
    let (pipeline, ids) = setup(LIBRARY);
    let mut queue = queue(&pipeline, 5);
    queue.set_filter(DocumentFilter::new().text("tamil"));

    assert_eq!(ids_of(queue.pending_for_assignment(None)), vec![ids[2].clone()]);
    assert_eq!(
        ids_of(queue.pending_for_assignment(Some(DocumentFilter::new().text("sanskrit")))),
        vec![ids[1].clone(), ids[3].clone()]
    );
}

#[test]
fn select_all_captures_current_matches_only() {
    let (pipeline, ids) = setup(LIBRARY);
    let mut queue = queue(&pipeline, 5);
    queue.set_filter(DocumentFilter::new().text("sanskrit"));

    assert_eq!(queue.select_all(), 2);
    assert!(queue.is_all_selected());

    // A later match is not added to the selection
    pipeline
        .ingest(DocumentMetadata::new("Sanskrit Grammar Volume 3", "Sanskrit", 10))
        .unwrap();
    assert_eq!(
        queue.selection(),
        &BTreeSet::from([ids[1].clone(), ids[3].clone()])
    );
    assert!(!queue.is_all_selected());
}

#[test]
fn select_deselect_and_toggle() {
    let (pipeline, ids) = setup(LIBRARY);
    let mut queue = queue(&pipeline, 5);

    queue.select(&ids[..3]);
    queue.deselect([&ids[1]]);
    queue.toggle(&ids[3]);
    queue.toggle(&ids[0]);

    assert_eq!(
        queue.selection(),
        &BTreeSet::from([ids[2].clone(), ids[3].clone()])
    );
    assert!(queue.is_selected(&ids[2]));
    assert!(!queue.is_selected(&ids[0]));

    queue.clear_selection();
    assert!(queue.selection().is_empty());
}

#[test]
fn empty_queue_is_never_all_selected() {
    let (pipeline, _) = setup(&[]);
    let mut queue = queue(&pipeline, 5);
    assert_eq!(queue.select_all(), 0);
    assert!(!queue.is_all_selected());
}

#[test]
fn assign_selected_keeps_failures_selected() {
    let (pipeline, ids) = setup(LIBRARY);
    let mut queue = queue(&pipeline, 5);
    queue.select_all();

    // Someone else takes one of the selected documents first
    pipeline.assign(&ids[2], Stage::Upload, "Other Admin").unwrap();

    let result = queue.assign_selected("Admin");
    assert_eq!(result.succeeded.len(), 3);
    assert_eq!(
        result.failed.get(&ids[2]),
        Some(&ErrorKind::InvalidTransition)
    );
    assert_eq!(queue.selection(), &BTreeSet::from([ids[2].clone()]));
    assert_eq!(queue.pending_for_assignment(None).count(), 0);
}

#[test]
fn assign_selected_tolerates_unknown_ids() {
    let (pipeline, ids) = setup(LIBRARY);
    let mut queue = queue(&pipeline, 5);
    let ghost = DocumentId::from("doc-404");
    queue.select([&ids[0], &ghost]);

    let result = queue.assign_selected("Admin");
    assert_eq!(result.succeeded, BTreeSet::from([ids[0].clone()]));
    assert_eq!(result.failed.get(&ghost), Some(&ErrorKind::NotFound));
    assert!(queue.is_selected(&ghost));
}

#[yare::parameterized(
    first = { 1, 3, vec![0, 1, 2] },
    second = { 2, 3, vec![3] },
    past_end = { 3, 3, vec![] },
    zero = { 0, 3, vec![] },
    single_page = { 1, 10, vec![0, 1, 2, 3] },
)]
fn pages_split_pending_documents(number: usize, page_size: usize, expected: Vec<usize>) {
    let (pipeline, ids) = setup(LIBRARY);
    let queue = queue(&pipeline, page_size);

    let page = queue.page(number);
    assert_eq!(page.number, number);
    assert_eq!(page.total_items, 4);
    assert_eq!(page.total_pages, 4usize.div_ceil(page_size));
    assert_eq!(
        ids_of(page.items.into_iter()),
        expected.into_iter().map(|i| ids[i].clone()).collect::<Vec<_>>()
    );
}

#[test]
fn page_respects_active_filter() {
    let (pipeline, _) = setup(LIBRARY);
    let mut queue = queue(&pipeline, 1);
    queue.set_filter(DocumentFilter::new().text("sanskrit"));

    let page = queue.page(2);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.items[0].title(), "Sanskrit Grammar Volume 2");
}
