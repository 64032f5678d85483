use crate::commands::{account, message, post, social};

#[derive(Clone, Copy)]
pub struct ExampleGroup {
    pub title: &'static str,
    pub commands: &'static [&'static str],
}

#[derive(Clone, Copy)]
pub struct CommandExample {
    pub name: &'static str,
    pub groups: &'static [ExampleGroup],
}

pub fn command_examples() -> &'static [CommandExample] {
    &[
        CommandExample {
            name: "register",
            groups: account::REGISTER_EXAMPLES,
        },
        CommandExample {
            name: "account",
            groups: account::ACCOUNT_EXAMPLES,
        },
        CommandExample {
            name: "profile",
            groups: account::PROFILE_EXAMPLES,
        },
        CommandExample {
            name: "post",
            groups: post::POST_EXAMPLES,
        },
        CommandExample {
            name: "comment",
            groups: post::COMMENT_EXAMPLES,
        },
        CommandExample {
            name: "comments",
            groups: post::COMMENT_EXAMPLES,
        },
        CommandExample {
            name: "like",
            groups: social::LIKE_EXAMPLES,
        },
        CommandExample {
            name: "connect",
            groups: social::CONNECT_EXAMPLES,
        },
        CommandExample {
            name: "user-list",
            groups: social::USER_LIST_EXAMPLES,
        },
        CommandExample {
            name: "search",
            groups: social::SEARCH_EXAMPLES,
        },
        CommandExample {
            name: "message",
            groups: message::EXAMPLES,
        },
    ]
}
