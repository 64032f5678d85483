use comfy_table::{Cell, Table};
use snugblog::{
    AccountView, Comment, ConversationView, Post, ProfileView, User,
    routes::UserListPage,
};

use crate::{
    output::{OutputManager, TableDisplay},
    theme::ICONS,
};

fn excerpt(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(limit).collect();
    cut.push('…');
    cut
}

impl TableDisplay for Post {
    fn to_table(&self, output: &OutputManager) -> Table {
        let mut table = output.create_table();
        table.add_row(vec![Cell::new("Id"), Cell::new(self.id)]);
        table.add_row(vec![Cell::new("Title"), Cell::new(&self.title)]);
        table.add_row(vec![Cell::new("Author"), Cell::new(self.author_id)]);
        table.add_row(vec![Cell::new("Posted"), Cell::new(self.date_posted.format("%Y-%m-%d"))]);
        table.add_row(vec![Cell::new("Likes"), Cell::new(format!("{} {}", ICONS.heart, self.likes))]);
        table.add_row(vec![Cell::new("Content"), Cell::new(&self.content)]);
        table
    }

    fn to_compact(&self) -> String {
        format!("#{} {} ({} likes)", self.id, self.title, self.likes)
    }
}

impl TableDisplay for Vec<Post> {
    fn to_table(&self, output: &OutputManager) -> Table {
        let mut table = output.create_table();
        output.add_table_header(&mut table, &["Id", "Title", "Author", "Posted", "Likes"]);
        for post in self {
            table.add_row(vec![
                Cell::new(post.id),
                Cell::new(excerpt(&post.title, 40)),
                Cell::new(post.author_id),
                Cell::new(post.date_posted.format("%Y-%m-%d")),
                Cell::new(post.likes),
            ]);
        }
        table
    }

    fn to_compact(&self) -> String {
        self.iter().map(TableDisplay::to_compact).collect::<Vec<_>>().join("\n")
    }
}

impl TableDisplay for Vec<User> {
    fn to_table(&self, output: &OutputManager) -> Table {
        let mut table = output.create_table();
        output.add_table_header(&mut table, &["Id", "Username", "Email", "Connections"]);
        for user in self {
            table.add_row(vec![
                Cell::new(user.id),
                Cell::new(&user.username),
                Cell::new(&user.email),
                Cell::new(user.connections),
            ]);
        }
        table
    }

    fn to_compact(&self) -> String {
        self.iter()
            .map(|user| format!("{} {}", user.id, user.username))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl TableDisplay for Vec<Comment> {
    fn to_table(&self, output: &OutputManager) -> Table {
        let mut table = output.create_table();
        output.add_table_header(&mut table, &["Id", "User", "Comment"]);
        for comment in self {
            table.add_row(vec![
                Cell::new(comment.id),
                Cell::new(comment.user_id),
                Cell::new(&comment.content),
            ]);
        }
        table
    }

    fn to_compact(&self) -> String {
        self.iter()
            .map(|comment| format!("{}: {}", comment.user_id, comment.content))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl TableDisplay for UserListPage {
    fn to_table(&self, output: &OutputManager) -> Table {
        let mut table = output.create_table();
        output.add_table_header(&mut table, &["Id", "Username", self.legend]);
        for card in &self.users {
            table.add_row(vec![
                Cell::new(card.user.id),
                Cell::new(&card.user.username),
                Cell::new(card.relationship.label()),
            ]);
        }
        table
    }

    fn to_compact(&self) -> String {
        self.users
            .iter()
            .map(|card| format!("{} {} [{}]", card.user.id, card.user.username, card.relationship.label()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl TableDisplay for ProfileView {
    fn to_table(&self, output: &OutputManager) -> Table {
        let mut table = output.create_table();
        table.add_row(vec![Cell::new("Username"), Cell::new(&self.user.username)]);
        table.add_row(vec![Cell::new("Picture"), Cell::new(&self.image_file)]);
        table.add_row(vec![Cell::new("Posts"), Cell::new(self.posts_count)]);
        table.add_row(vec![Cell::new("Connections"), Cell::new(self.connections)]);
        table.add_row(vec![
            Cell::new("Connected to you"),
            Cell::new(if self.is_connected { ICONS.link } else { "-" }),
        ]);
        table
    }

    fn to_compact(&self) -> String {
        format!(
            "{} posts={} connections={} connected={}",
            self.user.username, self.posts_count, self.connections, self.is_connected
        )
    }
}

impl TableDisplay for AccountView {
    fn to_table(&self, output: &OutputManager) -> Table {
        let mut table = output.create_table();
        table.add_row(vec![Cell::new("Username"), Cell::new(&self.user.username)]);
        table.add_row(vec![Cell::new("Email"), Cell::new(&self.user.email)]);
        table.add_row(vec![Cell::new("Picture"), Cell::new(&self.image_file)]);
        table.add_row(vec![Cell::new("Posts"), Cell::new(self.posts_count)]);
        table.add_row(vec![Cell::new("Connections"), Cell::new(self.connections)]);
        table
    }

    fn to_compact(&self) -> String {
        format!("{} <{}>", self.user.username, self.user.email)
    }
}

impl TableDisplay for ConversationView {
    fn to_table(&self, output: &OutputManager) -> Table {
        let mut table = output.create_table();
        output.add_table_header(&mut table, &["", "From", "Sent", "Message"]);
        for message in &self.messages {
            let from = if message.sender_id == self.with.id {
                self.with.username.clone()
            } else {
                "you".to_string()
            };
            table.add_row(vec![
                Cell::new(ICONS.mail),
                Cell::new(from),
                Cell::new(message.created_at.format("%Y-%m-%d %H:%M")),
                Cell::new(&message.content),
            ]);
        }
        table
    }

    fn to_compact(&self) -> String {
        self.messages
            .iter()
            .map(|message| format!("{}>{}: {}", message.sender_id, message.receiver_id, message.content))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
