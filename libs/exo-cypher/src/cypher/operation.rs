// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Concrete Cypher operations. Each operation renders to exactly one
//! parametrized statement; identifiers come from the (build-time validated)
//! schema and values always travel as parameters.

use super::schema::RelationshipDirection;
use super::{CypherBuilder, ExpressionBuilder};

/// The variable bound to the root node in every generated statement.
const ROOT_VAR: &str = "node";

#[derive(Debug)]
pub enum CypherOperation {
    CreateNode(CreateNode),
    UpdateNode(UpdateNode),
    SelectNode(SelectNode),
    SelectRelated(SelectRelated),
}

impl ExpressionBuilder for CypherOperation {
    fn build(&self, builder: &mut CypherBuilder) {
        match self {
            CypherOperation::CreateNode(create_node) => create_node.build(builder),
            CypherOperation::UpdateNode(update_node) => update_node.build(builder),
            CypherOperation::SelectNode(select_node) => select_node.build(builder),
            CypherOperation::SelectRelated(select_related) => select_related.build(builder),
        }
    }
}

/// `CREATE` a node with the given label and properties (the generated
/// identifier is already among the properties) and return its identifier.
#[derive(Debug)]
pub struct CreateNode {
    pub label: String,
    pub properties: serde_json::Map<String, serde_json::Value>,
}

impl ExpressionBuilder for CreateNode {
    fn build(&self, builder: &mut CypherBuilder) {
        builder.push_str("CREATE (");
        builder.push_str(ROOT_VAR);
        builder.push(':');
        builder.push_identifier(&self.label);
        builder.push_str(") SET ");
        builder.push_str(ROOT_VAR);
        builder.push_str(" = ");
        builder.push_param(serde_json::Value::Object(self.properties.clone()));
        builder.push_str(" RETURN ");
        builder.push_property(ROOT_VAR, "id");
        builder.push_str(" AS ");
        builder.push_identifier("id");
    }
}

/// `MATCH` a node by identifier and overwrite the supplied properties. Zero
/// returned rows means the target does not exist. An empty property set
/// renders without a `SET` clause, making the write a no-op that still
/// verifies existence.
#[derive(Debug)]
pub struct UpdateNode {
    pub label: String,
    pub id: serde_json::Value,
    pub properties: serde_json::Map<String, serde_json::Value>,
}

impl ExpressionBuilder for UpdateNode {
    fn build(&self, builder: &mut CypherBuilder) {
        push_match_root(builder, &self.label, self.id.clone());
        if !self.properties.is_empty() {
            builder.push_str(" SET ");
            builder.push_str(ROOT_VAR);
            builder.push_str(" += ");
            builder.push_param(serde_json::Value::Object(self.properties.clone()));
        }
        builder.push_str(" RETURN ");
        builder.push_property(ROOT_VAR, "id");
        builder.push_str(" AS ");
        builder.push_identifier("id");
    }
}

/// The scalar projection of a single node: output alias to property name.
#[derive(Debug, Clone)]
pub struct NodeProjection {
    pub aliased: Vec<(String, String)>,
}

impl NodeProjection {
    /// Renders a map projection such as
    /// `` n0 {`id`: n0.`id`, `firstName`: n0.`firstName`} ``
    fn build(&self, variable: &str, builder: &mut CypherBuilder) {
        builder.push_str(variable);
        builder.push_str(" {");
        builder.push_iter(self.aliased.iter(), ", ", |builder, (alias, property)| {
            builder.push_identifier(alias);
            builder.push_str(": ");
            builder.push_property(variable, property);
        });
        builder.push('}');
    }
}

/// Read back the scalar projection of the root node of a mutation.
#[derive(Debug)]
pub struct SelectNode {
    pub label: String,
    pub id: serde_json::Value,
    pub projection: NodeProjection,
}

impl ExpressionBuilder for SelectNode {
    fn build(&self, builder: &mut CypherBuilder) {
        push_match_root(builder, &self.label, self.id.clone());
        builder.push_str(" RETURN ");
        builder.push_property(ROOT_VAR, "id");
        builder.push_str(" AS ");
        builder.push_identifier("__id");
        builder.push_str(", ");
        self.projection.build(ROOT_VAR, builder);
        builder.push_str(" AS ");
        builder.push_identifier("node");
    }
}

/// One hop of a traversal path.
#[derive(Debug, Clone)]
pub struct TraversalSegment {
    pub relationship: String,
    pub direction: RelationshipDirection,
    pub target_label: String,
}

/// Read back the nodes reachable from the mutation's root node through a
/// relationship path, together with the identifier of the node they hang off
/// of. Results are ordered by the internal ids of the traversed
/// relationships, which reflect the order the relationships were established;
/// successive identical requests therefore enumerate related nodes in the
/// same order.
#[derive(Debug)]
pub struct SelectRelated {
    pub root_label: String,
    pub root_id: serde_json::Value,
    pub path: Vec<TraversalSegment>,
    pub projection: NodeProjection,
}

impl ExpressionBuilder for SelectRelated {
    fn build(&self, builder: &mut CypherBuilder) {
        push_match_root(builder, &self.root_label, self.root_id.clone());

        for (i, segment) in self.path.iter().enumerate() {
            match segment.direction {
                RelationshipDirection::Outgoing => builder.push_str("-["),
                RelationshipDirection::Incoming => builder.push_str("<-["),
            }
            builder.push_str(&format!("r{i}"));
            builder.push(':');
            builder.push_identifier(&segment.relationship);
            match segment.direction {
                RelationshipDirection::Outgoing => builder.push_str("]->("),
                RelationshipDirection::Incoming => builder.push_str("]-("),
            }
            builder.push_str(&format!("n{i}"));
            builder.push(':');
            builder.push_identifier(&segment.target_label);
            builder.push(')');
        }

        let leaf = format!("n{}", self.path.len() - 1);
        let parent = if self.path.len() == 1 {
            ROOT_VAR.to_string()
        } else {
            format!("n{}", self.path.len() - 2)
        };

        builder.push_str(" RETURN ");
        builder.push_property(parent.as_str(), "id");
        builder.push_str(" AS ");
        builder.push_identifier("__parent_id");
        builder.push_str(", ");
        builder.push_property(leaf.as_str(), "id");
        builder.push_str(" AS ");
        builder.push_identifier("__id");
        builder.push_str(", ");
        self.projection.build(&leaf, builder);
        builder.push_str(" AS ");
        builder.push_identifier("node");

        builder.push_str(" ORDER BY ");
        builder.push_iter(0..self.path.len(), ", ", |builder, i| {
            builder.push_str(&format!("id(r{i})"));
        });
    }
}

fn push_match_root(builder: &mut CypherBuilder, label: &str, id: serde_json::Value) {
    builder.push_str("MATCH (");
    builder.push_str(ROOT_VAR);
    builder.push(':');
    builder.push_identifier(label);
    builder.push_str(" {");
    builder.push_identifier("id");
    builder.push_str(": ");
    builder.push_param(id);
    builder.push_str("})");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(operation: &CypherOperation) -> super::super::statement::CypherStatement {
        let mut builder = CypherBuilder::new();
        operation.build(&mut builder);
        builder.into_statement()
    }

    #[test]
    fn create_node_statement() {
        let statement = render(&CypherOperation::CreateNode(CreateNode {
            label: "Person".into(),
            properties: serde_json::json!({"id": "u1", "firstName": "Bob"})
                .as_object()
                .unwrap()
                .clone(),
        }));

        assert_eq!(
            statement.text,
            "CREATE (node:`Person`) SET node = $p0 RETURN node.`id` AS `id`"
        );
        assert_eq!(
            statement.params,
            vec![(
                "p0".to_string(),
                serde_json::json!({"id": "u1", "firstName": "Bob"})
            )]
        );
    }

    #[test]
    fn update_node_statement() {
        let statement = render(&CypherOperation::UpdateNode(UpdateNode {
            label: "Person".into(),
            id: serde_json::json!("u1"),
            properties: serde_json::json!({"lastName": "Gruber"})
                .as_object()
                .unwrap()
                .clone(),
        }));

        assert_eq!(
            statement.text,
            "MATCH (node:`Person` {`id`: $p0}) SET node += $p1 RETURN node.`id` AS `id`"
        );
    }

    #[test]
    fn update_node_without_properties_skips_set() {
        let statement = render(&CypherOperation::UpdateNode(UpdateNode {
            label: "Person".into(),
            id: serde_json::json!("u1"),
            properties: serde_json::Map::new(),
        }));

        assert_eq!(
            statement.text,
            "MATCH (node:`Person` {`id`: $p0}) RETURN node.`id` AS `id`"
        );
    }

    #[test]
    fn select_related_statement_orders_by_relationship_id() {
        let statement = render(&CypherOperation::SelectRelated(SelectRelated {
            root_label: "Person".into(),
            root_id: serde_json::json!("u1"),
            path: vec![TraversalSegment {
                relationship: "HAS_SKILL".into(),
                direction: RelationshipDirection::Outgoing,
                target_label: "Skill".into(),
            }],
            projection: NodeProjection {
                aliased: vec![
                    ("id".into(), "id".into()),
                    ("name".into(), "name".into()),
                ],
            },
        }));

        assert_eq!(
            statement.text,
            "MATCH (node:`Person` {`id`: $p0})-[r0:`HAS_SKILL`]->(n0:`Skill`) \
             RETURN node.`id` AS `__parent_id`, n0.`id` AS `__id`, \
             n0 {`id`: n0.`id`, `name`: n0.`name`} AS `node` ORDER BY id(r0)"
        );
    }

    #[test]
    fn select_related_two_hops_groups_by_intermediate_node() {
        let statement = render(&CypherOperation::SelectRelated(SelectRelated {
            root_label: "Person".into(),
            root_id: serde_json::json!("u1"),
            path: vec![
                TraversalSegment {
                    relationship: "HAS_SKILL".into(),
                    direction: RelationshipDirection::Outgoing,
                    target_label: "Skill".into(),
                },
                TraversalSegment {
                    relationship: "ENDORSED_BY".into(),
                    direction: RelationshipDirection::Outgoing,
                    target_label: "Person".into(),
                },
            ],
            projection: NodeProjection {
                aliased: vec![("id".into(), "id".into())],
            },
        }));

        assert_eq!(
            statement.text,
            "MATCH (node:`Person` {`id`: $p0})-[r0:`HAS_SKILL`]->(n0:`Skill`)\
             -[r1:`ENDORSED_BY`]->(n1:`Person`) \
             RETURN n0.`id` AS `__parent_id`, n1.`id` AS `__id`, \
             n1 {`id`: n1.`id`} AS `node` ORDER BY id(r0), id(r1)"
        );
    }
}
