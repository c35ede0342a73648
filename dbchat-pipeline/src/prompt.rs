//! Prompt templates for SQL generation and answer composition.
//!
//! The templates are the only mechanism steering the model: the single-
//! statement output convention and the fallback sentence are enforced by
//! instruction wording, not validated downstream.

use dbchat_core::Transcript;

/// Fixed sentence the answer prompt instructs the model to emit when the
/// data cannot answer the question.
pub const FALLBACK_ANSWER: &str = "I don't have the necessary data to answer this query.";

/// Compose the SQL-generation prompt.
pub fn sql_prompt(schema: &str, transcript: &Transcript, question: &str) -> String {
    format!(
        "You are a PostgreSQL expert working as a data analyst at a company. \
         You are interacting with a user who is asking you questions about the \
         company's database. Based on the table schema below, write a \
         PostgreSQL query that would answer the user's question.\n\
         \n\
         <SCHEMA>{schema}</SCHEMA>\n\
         \n\
         Conversation History:\n{history}\n\
         \n\
         Write only the PostgreSQL SQL query and nothing else. Do not wrap \
         the SQL query in any other text, not even backticks.\n\
         \n\
         Question: {question}\n\
         SQL Query:",
        schema = schema,
        history = format_history(transcript),
        question = question,
    )
}

/// Compose the answer prompt from the question, generated SQL and the
/// execution result (success text or error text, indistinguishably).
pub fn answer_prompt(
    schema: &str,
    transcript: &Transcript,
    question: &str,
    sql: &str,
    response: &str,
) -> String {
    format!(
        "You are a data analyst at a company. You are interacting with a user \
         who is asking you questions about the company's database. Based on \
         the table schema below, question, SQL query, and SQL response, write \
         a natural language response. Do not give the query as the output and \
         show the number rather than text.\n\
         \n\
         If the data does not exist or the question cannot be answered, \
         respond with: \"{fallback}\"\n\
         \n\
         <SCHEMA>{schema}</SCHEMA>\n\
         \n\
         Conversation History:\n{history}\n\
         SQL Query: <SQL>{sql}</SQL>\n\
         User question: {question}\n\
         SQL Response: {response}",
        fallback = FALLBACK_ANSWER,
        schema = schema,
        history = format_history(transcript),
        sql = sql,
        question = question,
        response = response,
    )
}

/// Format the transcript as literal chat history, one turn per line.
///
/// Turn content appears verbatim; the transcript is never reformatted.
fn format_history(transcript: &Transcript) -> String {
    transcript
        .iter()
        .map(|turn| format!("{}: {}", turn.role, turn.content))
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_transcript() -> Transcript {
        let mut transcript = Transcript::new();
        transcript.push_ai("Hello!");
        transcript.push_human("How many employees are there?");
        transcript
    }

    #[test]
    fn test_sql_prompt_contains_all_slots() {
        let prompt = sql_prompt(
            "Table \"employees\"\n  id integer\n",
            &sample_transcript(),
            "How many joined after 2023?",
        );
        assert!(prompt.contains("<SCHEMA>Table \"employees\""));
        assert!(prompt.contains("Question: How many joined after 2023?"));
        assert!(prompt.contains("not even backticks"));
        assert!(prompt.ends_with("SQL Query:"));
    }

    #[test]
    fn test_history_turns_appear_verbatim() {
        let mut transcript = Transcript::new();
        let content = "  odd   spacing\tand symbols <>&";
        transcript.push_human(content);

        let prompt = sql_prompt("schema", &transcript, "q");
        assert!(prompt.contains(&format!("Human: {}", content)));
    }

    #[test]
    fn test_answer_prompt_contains_fallback_and_sql() {
        let prompt = answer_prompt(
            "schema",
            &sample_transcript(),
            "How many?",
            "SELECT COUNT(*) FROM employees",
            "[(42,)]",
        );
        assert!(prompt.contains(FALLBACK_ANSWER));
        assert!(prompt.contains("<SQL>SELECT COUNT(*) FROM employees</SQL>"));
        assert!(prompt.contains("SQL Response: [(42,)]"));
    }

    #[test]
    fn test_history_preserves_turn_order() {
        let mut transcript = Transcript::new();
        transcript.push_human("first");
        transcript.push_ai("second");
        transcript.push_human("third");

        let prompt = sql_prompt("s", &transcript, "q");
        let first = prompt.find("Human: first").unwrap();
        let second = prompt.find("AI: second").unwrap();
        let third = prompt.find("Human: third").unwrap();
        assert!(first < second && second < third);
    }
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Round-trip: any turn appended to history appears verbatim in the
        /// composed prompt text.
        #[test]
        fn prop_turn_content_verbatim_in_prompt(content in "[^\r\n]{1,60}") {
            let mut transcript = Transcript::new();
            transcript.push_human(content.clone());

            let expected = format!("Human: {}", content);

            let sql = sql_prompt("schema", &transcript, "question");
            prop_assert!(sql.contains(&expected));

            let answer = answer_prompt("schema", &transcript, "question", "SELECT 1", "[(1,)]");
            prop_assert!(answer.contains(&expected));
        }
    }
}
