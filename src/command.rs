/// One-way instructions posted to the enclosing page
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    RegisterTrigger {
        trigger: String,
        name: String,
    },
    SendCommand {
        command: String,
    },
    ForceMenuChoice {
        choice: String,
        #[serde(rename = "mod")]
        modifier: u32,
    },
    ForceMenuBack,
    Pin,
}

impl Command {
    pub fn choose(choice: impl Into<String>) -> Command {
        Command::ForceMenuChoice {
            choice: choice.into(),
            modifier: 0,
        }
    }

    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_format() {
        assert_eq!(
            Command::RegisterTrigger {
                trigger: "t".to_string(),
                name: "T".to_string()
            }
            .to_value(),
            json!({"type": "registerTrigger", "trigger": "t", "name": "T"})
        );
        assert_eq!(
            Command::SendCommand {
                command: "faction".to_string()
            }
            .to_value(),
            json!({"type": "sendCommand", "command": "faction"})
        );
        assert_eq!(
            Command::choose("Member List").to_value(),
            json!({"type": "forceMenuChoice", "choice": "Member List", "mod": 0})
        );
        assert_eq!(Command::ForceMenuBack.to_value(), json!({"type": "forceMenuBack"}));
        assert_eq!(Command::Pin.to_value(), json!({"type": "pin"}));
    }
}
