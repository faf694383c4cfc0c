use crate::{
    wire::{self, PromptBody},
    ChatMessage, LangfuseError, Prompt, PromptContent,
};

const CHAT_MESSAGE_TYPE: &str = "chatmessage";
const PLACEHOLDER_TYPE: &str = "placeholder";

pub(crate) fn decode_prompt(record: wire::PromptRecord) -> Result<Prompt, LangfuseError> {
    let kind = record.kind.as_deref().ok_or_else(|| {
        LangfuseError::Decode(format!("prompt '{}' is missing its type", record.name))
    })?;

    let content = match kind {
        "text" => match record.prompt {
            None => PromptContent::Text(String::new()),
            Some(PromptBody::Text(text)) => PromptContent::Text(text),
            Some(_) => {
                return Err(LangfuseError::Decode(format!(
                    "text prompt '{}' must carry a string body",
                    record.name
                )))
            }
        },
        "chat" => {
            let messages = match record.prompt {
                None => Vec::new(),
                Some(PromptBody::Messages(messages)) => messages,
                Some(PromptBody::Message(message)) => vec![message],
                Some(PromptBody::Text(_)) => {
                    return Err(LangfuseError::Decode(format!(
                        "chat prompt '{}' must carry a message list",
                        record.name
                    )))
                }
            };
            PromptContent::Chat(
                messages
                    .into_iter()
                    .enumerate()
                    .map(|(index, message)| decode_chat_message(message, index))
                    .collect::<Result<Vec<_>, _>>()?,
            )
        }
        other => {
            return Err(LangfuseError::Decode(format!(
                "unknown prompt type '{other}' for prompt '{}'",
                record.name
            )))
        }
    };

    Ok(Prompt {
        name: record.name,
        content,
        version: record.version,
        config: record.config.filter(|config| !config.is_null()),
        labels: record.labels,
        tags: record.tags,
        commit_message: record.commit_message,
    })
}

pub(crate) fn encode_prompt(prompt: Prompt) -> wire::PromptRecord {
    let kind = prompt.kind().to_owned();
    let body = match prompt.content {
        PromptContent::Text(text) => PromptBody::Text(text),
        PromptContent::Chat(messages) => {
            PromptBody::Messages(messages.into_iter().map(encode_chat_message).collect())
        }
    };

    wire::PromptRecord {
        kind: Some(kind),
        name: prompt.name,
        prompt: Some(body),
        version: prompt.version,
        config: prompt.config,
        labels: prompt.labels,
        tags: prompt.tags,
        commit_message: prompt.commit_message,
    }
}

fn decode_chat_message(
    message: wire::ChatMessage,
    index: usize,
) -> Result<ChatMessage, LangfuseError> {
    match message.kind.as_deref() {
        Some(PLACEHOLDER_TYPE) => {
            let name = message.name.ok_or_else(|| {
                LangfuseError::Decode(format!("placeholder message {index} is missing its name"))
            })?;
            Ok(ChatMessage::Placeholder { name })
        }
        None | Some(CHAT_MESSAGE_TYPE) => {
            let role = message.role.ok_or_else(|| {
                LangfuseError::Decode(format!("chat message {index} is missing its role"))
            })?;
            Ok(ChatMessage::Message {
                role,
                content: message.content.unwrap_or_default(),
            })
        }
        Some(other) => Err(LangfuseError::Decode(format!(
            "unknown chat message type '{other}' at index {index}"
        ))),
    }
}

fn encode_chat_message(message: ChatMessage) -> wire::ChatMessage {
    match message {
        ChatMessage::Message { role, content } => wire::ChatMessage {
            kind: Some(CHAT_MESSAGE_TYPE.to_owned()),
            role: Some(role),
            content: Some(content),
            name: None,
        },
        ChatMessage::Placeholder { name } => wire::ChatMessage {
            kind: Some(PLACEHOLDER_TYPE.to_owned()),
            role: None,
            content: None,
            name: Some(name),
        },
    }
}

impl TryFrom<wire::PromptRecord> for Prompt {
    type Error = LangfuseError;

    fn try_from(record: wire::PromptRecord) -> Result<Self, Self::Error> {
        decode_prompt(record)
    }
}

impl From<Prompt> for wire::PromptRecord {
    fn from(prompt: Prompt) -> Self {
        encode_prompt(prompt)
    }
}
