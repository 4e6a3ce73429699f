//! Server-rendered pages of the iris app.

use std::collections::HashMap;
use validator::ValidationErrors;

use crate::utils::escape_html;
use entity::{iris, user_account};

/// Field name to messages, for redisplaying a form.
pub type FieldErrors = HashMap<String, Vec<String>>;

pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(m) => m.to_string(),
                    None => format!("Invalid value ({})", e.code),
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n\
         <nav><a href=\"/\">Predict</a> | <a href=\"/iris\">Iris data</a> | <a href=\"/register\">Register</a></nav>\n\
         {body}\n</body>\n</html>\n",
        title = escape_html(title),
        body = body
    )
}

fn input(name: &str, attrs: &str, value: Option<&str>, errors: &FieldErrors) -> String {
    let mut html = format!(
        "<p><label for=\"{name}\">{name}</label> <input id=\"{name}\" name=\"{name}\" {attrs} value=\"{value}\" required>",
        name = name,
        attrs = attrs,
        value = escape_html(value.unwrap_or_default())
    );
    for message in errors.get(name).into_iter().flatten() {
        html.push_str(&format!(
            " <span class=\"error\">{}</span>",
            escape_html(message)
        ));
    }
    html.push_str("</p>\n");
    html
}

pub const MEASUREMENT_FIELDS: [&str; 4] = ["sepal_length", "sepal_width", "petal_length", "petal_width"];

/// The home page with the prediction form.
///
/// `values` refills the form after a submission; `prediction` is the label to show, if any.
pub fn index(values: &HashMap<&str, String>, errors: &FieldErrors, prediction: Option<&str>) -> String {
    let mut body = String::from("<h1>Iris species predictor</h1>\n<form method=\"post\" action=\"/\">\n");
    for field in MEASUREMENT_FIELDS {
        body.push_str(&input(
            field,
            r#"type="number" step="any""#,
            values.get(field).map(String::as_str),
            errors,
        ));
    }
    body.push_str("<button type=\"submit\">Predict</button>\n</form>\n");
    if let Some(label) = prediction {
        body.push_str(&format!(
            "<p id=\"prediction\">Predicted Iris type: {}</p>\n",
            escape_html(label)
        ));
    }
    layout("Iris Home", &body)
}

pub fn iris_list(rows: &[iris::Model]) -> String {
    let mut body = String::from(
        "<h1>Iris data</h1>\n<table>\n<tr><th>Sepal length</th><th>Sepal width</th>\
         <th>Petal length</th><th>Petal width</th><th>Species</th></tr>\n",
    );
    for row in rows {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            row.sepal_length,
            row.sepal_width,
            row.petal_length,
            row.petal_width,
            escape_html(&row.species)
        ));
    }
    body.push_str("</table>");
    layout("Iris data", &body)
}

pub fn register(email: Option<&str>, errors: &FieldErrors) -> String {
    let mut body = String::from("<h1>Register</h1>\n<form method=\"post\" action=\"/register\">\n");
    body.push_str(&input("email", r#"type="email""#, email, errors));
    body.push_str(&input("password", r#"type="password""#, None, errors));
    body.push_str("<button type=\"submit\">Register</button>\n</form>");
    layout("Register", &body)
}

/// The confirmation shown once an account exists. Never includes the password.
pub fn registered(user: &user_account::Model) -> String {
    format!(
        "<p id='registered'>You are registered! User: &lt;{}, {}&gt;</p>",
        user.user_id,
        escape_html(&user.email)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_shows_prediction_and_errors() {
        let mut values = HashMap::new();
        values.insert("sepal_length", "-1".to_string());
        let mut errors = FieldErrors::new();
        errors.insert("sepal_length".into(), vec!["Must be a positive number.".into()]);

        let html = index(&values, &errors, None);
        assert!(html.contains("<title>Iris Home</title>"));
        assert!(html.contains("value=\"-1\""));
        assert!(html.contains("Must be a positive number."));
        assert!(!html.contains("Predicted Iris type"));

        let html = index(&HashMap::new(), &FieldErrors::new(), Some("iris-setosa"));
        assert!(html.contains("Predicted Iris type: iris-setosa"));
    }

    #[test]
    fn registered_hides_password() {
        let user = user_account::Model {
            user_id: 3,
            email: "a@b.com".into(),
            password: "$argon2$secret".into(),
        };
        let html = registered(&user);
        assert!(html.contains("You are registered!"));
        assert!(html.contains("a@b.com"));
        assert!(!html.contains("secret"));
    }
}
