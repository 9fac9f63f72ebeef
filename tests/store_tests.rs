// Integration tests for the in-memory store: whole-row upsert semantics
// under interleaved re-uploads, ordered retrieval, and Q&A id assignment.

use anyhow::Result;
use meetingd::store::{
    ChunkRecord, ChunkStore, MemoryStore, NewQaInteraction, QaStore,
};

fn chunk(meeting_id: &str, number: u64, audio: &[u8], segment: Option<&str>) -> ChunkRecord {
    ChunkRecord {
        meeting_id: meeting_id.to_string(),
        chunk_number: number,
        chunk_timestamp: number * 10_000,
        audio: audio.to_vec(),
        sample_rate: 16_000,
        transcript_segment: segment.map(str::to_owned),
    }
}

#[tokio::test]
async fn test_interleaved_reupload_never_mixes_rows() -> Result<()> {
    let store = MemoryStore::new();

    // Writer A persists its audio, then a re-upload (writer B) lands before
    // A writes its segment back. A's segment write is a whole-row upsert, so
    // the final row is A's audio with A's segment — stale but internally
    // consistent, never B's audio with A's segment.
    store.upsert(chunk("m", 0, b"take-one", None)).await?;
    store.upsert(chunk("m", 0, b"take-two", Some("two"))).await?;
    store.upsert(chunk("m", 0, b"take-one", Some("one"))).await?;

    let rows = store.list_by_meeting("m").await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].audio, b"take-one");
    assert_eq!(rows[0].transcript_segment.as_deref(), Some("one"));

    Ok(())
}

#[tokio::test]
async fn test_list_is_ordered_by_chunk_number() -> Result<()> {
    let store = MemoryStore::new();

    for number in [7u64, 0, 3, 12, 1] {
        store.upsert(chunk("m", number, b"pcm", None)).await?;
    }

    let numbers: Vec<u64> = store
        .list_by_meeting("m")
        .await?
        .iter()
        .map(|row| row.chunk_number)
        .collect();
    assert_eq!(numbers, vec![0, 1, 3, 7, 12]);

    Ok(())
}

#[tokio::test]
async fn test_counts_are_per_meeting() -> Result<()> {
    let store = MemoryStore::new();

    store.upsert(chunk("a", 0, b"x", None)).await?;
    store.upsert(chunk("a", 1, b"x", None)).await?;
    store.upsert(chunk("b", 0, b"x", None)).await?;

    assert_eq!(store.count("a").await?, 2);
    assert_eq!(store.count("b").await?, 1);
    assert_eq!(store.count("c").await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_interaction_ids_are_sequential() -> Result<()> {
    let store = MemoryStore::new();

    for question in ["one", "two"] {
        store
            .append(NewQaInteraction {
                meeting_id: "m".to_string(),
                question: question.to_string(),
                answer: "a".to_string(),
                model_used: "stub-model".to_string(),
                response_time: 0.1,
            })
            .await?;
    }

    let history = store.interactions().await;
    assert_eq!(history[0].id, 1);
    assert_eq!(history[1].id, 2);

    Ok(())
}
