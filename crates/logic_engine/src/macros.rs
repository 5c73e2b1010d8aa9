/// Define a unit-struct rule.
///
/// ```ignore
/// define_rule!(MyRule, "My Rule", [Tag::Negation], |session, node| { false });
/// define_rule!(MySpecialRule, "Mine", [Tag::Conjunction], special, |session, node| { false });
/// ```
#[macro_export]
macro_rules! define_rule {
    (
        $(#[$meta:meta])*
        $struct_name:ident,
        $name_str:expr,
        [$($tag:expr),+ $(,)?],
        special,
        | $session:ident, $node:ident | $body:block
    ) => {
        $(#[$meta])*
        pub struct $struct_name;

        impl $crate::rule::Rule for $struct_name {
            fn name(&self) -> &str {
                $name_str
            }

            fn target_tags(&self) -> Vec<::logic_ast::Tag> {
                vec![$($tag),+]
            }

            fn is_special(&self) -> bool {
                true
            }

            fn apply(&self, $session: &mut $crate::session::Session, $node: ::logic_ast::NodeId) -> bool {
                $body
            }
        }
    };
    (
        $(#[$meta:meta])*
        $struct_name:ident,
        $name_str:expr,
        [$($tag:expr),+ $(,)?],
        | $session:ident, $node:ident | $body:block
    ) => {
        $(#[$meta])*
        pub struct $struct_name;

        impl $crate::rule::Rule for $struct_name {
            fn name(&self) -> &str {
                $name_str
            }

            fn target_tags(&self) -> Vec<::logic_ast::Tag> {
                vec![$($tag),+]
            }

            fn apply(&self, $session: &mut $crate::session::Session, $node: ::logic_ast::NodeId) -> bool {
                $body
            }
        }
    };
}
