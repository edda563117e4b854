//! Prompt construction for dialogue generation and structuring.
//!
//! Both builders are pure string formatting: the summary and the
//! unstructured conversation are embedded verbatim, and no validation is
//! applied to their content.

/// Name of the virtual function the structuring call is forced to answer.
pub const STRUCTURING_FUNCTION_NAME: &str = "structured_conversation";

/// Build the free-form dialogue-generation prompt.
///
/// Asks the model to invent a conversation between `name_a` and `name_b`,
/// who are not part of the video but discuss it, wrapped in a fixed
/// delimiter convention so the raw text is easy to spot in logs.
pub fn build_dialogue_prompt(summary: &str, name_a: &str, name_b: &str) -> String {
    format!(
        "\
Given is a summary of a video.

::::::::::::::summary::::::::::::::::

{summary}

:::::::::::::::::::::::::::::::::::::

Now create a real world conversation between two people whose names are {name_a} and {name_b} \
where they talk about the video whose summary I have provided you above.

Note {name_a} and {name_b} aren't part of the video but just talk about it.

Output me in this pattern:

:::::::::conversation::::::::::

.............here give me the conversation... where its dialogue is followed after name.

:::::::::::::::::::::::::::::::
"
    )
}

/// Build the structuring prompt for an unstructured conversation.
///
/// Instructs the model to convert the text into the `dialogues` list without
/// inventing content and preserving order.
pub fn build_structuring_prompt(unstructured: &str) -> String {
    format!(
        "\
Structure the below context:

:::::::::context::::::

{unstructured}

:::::::::::::::::::::::::::

Convert this into a structured JSON format with the key 'dialogues'.
Each entry should be a dictionary with 'name' and 'dialogue' keys.

Use the provided data as it is, do not make up anything.

Make sure order of each dialogue is maintained.
"
    )
}

/// Function description forced onto the structuring call.
///
/// An object with a required `dialogues` array whose items each require the
/// string fields `name` and `dialogue`.
pub fn structuring_function() -> serde_json::Value {
    serde_json::json!({
        "name": STRUCTURING_FUNCTION_NAME,
        "description": "Converts the unstructured conversation into a structured dialogue list based on the provided schema.",
        "parameters": {
            "type": "object",
            "properties": {
                "dialogues": {
                    "type": "array",
                    "description": "List of structured dialogues",
                    "items": {
                        "type": "object",
                        "properties": {
                            "name": {
                                "type": "string",
                                "description": "The name of the speaker."
                            },
                            "dialogue": {
                                "type": "string",
                                "description": "The dialogue said by the speaker."
                            }
                        },
                        "required": ["name", "dialogue"]
                    }
                }
            },
            "required": ["dialogues"]
        }
    })
}
