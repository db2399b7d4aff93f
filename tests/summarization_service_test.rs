mod helpers;

use std::sync::Arc;

use replydesk::application::ports::LlmClientError;
use replydesk::application::services::SummarizationError;
use replydesk::domain::MessageRole;

use helpers::{ScriptedLlmClient, is_merge_prompt, numbered_words, prompt_of, summarization_service};

const BUDGET: usize = 5;
const MAX_DEPTH: usize = 2;

#[tokio::test]
async fn given_text_within_budget_after_first_pass_when_summarizing_then_calls_once_per_chunk_plus_merge()
 {
    let llm = Arc::new(ScriptedLlmClient::new(|turns| {
        if is_merge_prompt(turns) {
            Ok("  final overview \n".to_string())
        } else {
            Ok(" s ".to_string())
        }
    }));
    let service = summarization_service(Arc::clone(&llm), BUDGET, MAX_DEPTH);

    let summary = service.summarize(&numbered_words(12)).await.unwrap();

    assert_eq!(summary, "final overview");
    let calls = llm.calls();
    assert_eq!(calls.len(), 4);
    for call in &calls {
        assert_eq!(call.len(), 1);
        assert_eq!(call[0].role, MessageRole::User);
    }
}

#[tokio::test]
async fn given_chunks_when_summarizing_then_prompts_follow_chunk_order_and_templates() {
    let llm = Arc::new(ScriptedLlmClient::new(|turns| {
        if is_merge_prompt(turns) {
            Ok("done".to_string())
        } else {
            Ok(format!("part{}", prompt_of(turns).len() % 7))
        }
    }));
    let service = summarization_service(Arc::clone(&llm), BUDGET, MAX_DEPTH);

    service.summarize(&numbered_words(12)).await.unwrap();

    let calls = llm.calls();
    assert_eq!(
        prompt_of(&calls[0]),
        "Summarise clearly:\n\nword1 word2 word3 word4 word5\n\nSummary:"
    );
    assert_eq!(
        prompt_of(&calls[1]),
        "Summarise clearly:\n\nword6 word7 word8 word9 word10\n\nSummary:"
    );
    assert_eq!(
        prompt_of(&calls[2]),
        "Summarise clearly:\n\nword11 word12\n\nSummary:"
    );

    let merge = prompt_of(&calls[3]);
    assert!(merge.starts_with("Merge and refine these summaries into one concise overview:\n\n"));
    assert!(merge.ends_with("\n\nFinal summary (plain text, no markdown):"));
}

#[tokio::test]
async fn given_partial_summaries_when_merging_then_they_are_joined_by_blank_lines() {
    let llm = Arc::new(ScriptedLlmClient::new(|turns| {
        let prompt = prompt_of(turns);
        if is_merge_prompt(turns) {
            Ok("done".to_string())
        } else if prompt.contains("word1 ") {
            Ok("alpha".to_string())
        } else {
            Ok("beta".to_string())
        }
    }));
    let service = summarization_service(Arc::clone(&llm), BUDGET, MAX_DEPTH);

    service.summarize(&numbered_words(8)).await.unwrap();

    let calls = llm.calls();
    assert_eq!(calls.len(), 3);
    assert!(prompt_of(&calls[2]).contains("\n\nalpha\n\nbeta\n\n"));
}

#[tokio::test]
async fn given_merged_summary_over_budget_when_summarizing_then_reduces_once_more_before_final_merge()
 {
    let llm = Arc::new(ScriptedLlmClient::new(|turns| {
        if is_merge_prompt(turns) {
            Ok("merged".to_string())
        } else if prompt_of(turns).contains("word") {
            Ok("a b c".to_string())
        } else {
            Ok("z".to_string())
        }
    }));
    let service = summarization_service(Arc::clone(&llm), BUDGET, MAX_DEPTH);

    let summary = service.summarize(&numbered_words(12)).await.unwrap();

    assert_eq!(summary, "merged");
    let calls = llm.calls();
    // 3 chunk calls, then 2 chunk calls and a merge one level down, then the outer merge.
    assert_eq!(calls.len(), 7);
    assert_eq!(
        prompt_of(&calls[5]),
        "Merge and refine these summaries into one concise overview:\n\nz\n\nz\n\nFinal summary (plain text, no markdown):"
    );
    assert!(prompt_of(&calls[6]).contains("\n\nmerged\n\n"));
}

#[tokio::test]
async fn given_summaries_that_never_shrink_when_summarizing_then_fails_at_recursion_limit() {
    let llm = Arc::new(ScriptedLlmClient::new(|turns| {
        if is_merge_prompt(turns) {
            Ok("merged".to_string())
        } else {
            Ok("a b c".to_string())
        }
    }));
    let service = summarization_service(Arc::clone(&llm), BUDGET, MAX_DEPTH);

    let result = service.summarize(&numbered_words(12)).await;

    assert!(matches!(
        result,
        Err(SummarizationError::RecursionLimitExceeded {
            max_depth: MAX_DEPTH,
            tokens: 6
        })
    ));
    assert!(llm.calls().iter().all(|call| !is_merge_prompt(call)));
}

#[tokio::test]
async fn given_zero_recursion_depth_when_first_pass_is_over_budget_then_fails_without_merging() {
    let llm = Arc::new(ScriptedLlmClient::replying("a b c"));
    let service = summarization_service(Arc::clone(&llm), BUDGET, 0);

    let result = service.summarize(&numbered_words(12)).await;

    assert!(matches!(
        result,
        Err(SummarizationError::RecursionLimitExceeded { max_depth: 0, .. })
    ));
    assert_eq!(llm.call_count(), 3);
}

#[tokio::test]
async fn given_blank_text_when_summarizing_then_returns_empty_input_without_calls() {
    let llm = Arc::new(ScriptedLlmClient::replying("unused"));
    let service = summarization_service(Arc::clone(&llm), BUDGET, MAX_DEPTH);

    let result = service.summarize(" \n\t ").await;

    assert!(matches!(result, Err(SummarizationError::EmptyInput)));
    assert_eq!(llm.call_count(), 0);
}

#[tokio::test]
async fn given_failing_chunk_call_when_summarizing_then_aborts_without_further_calls() {
    let llm = Arc::new(ScriptedLlmClient::new(|turns| {
        if prompt_of(turns).contains("word6 ") {
            Err(LlmClientError::RateLimited)
        } else {
            Ok("s".to_string())
        }
    }));
    let service = summarization_service(Arc::clone(&llm), BUDGET, MAX_DEPTH);

    let result = service.summarize(&numbered_words(12)).await;

    assert!(matches!(
        result,
        Err(SummarizationError::Completion(LlmClientError::RateLimited))
    ));
    assert_eq!(llm.call_count(), 2);
}
